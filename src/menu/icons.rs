use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! menu_icons {
    ($($variant:ident => $lucide:literal),+ $(,)?) => {
        /// Icons a menu item may reference by name
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MenuIcon {
            $($variant),+
        }

        impl MenuIcon {
            pub const ALL: &'static [MenuIcon] = &[$(MenuIcon::$variant),+];

            /// Canonical name, as accepted in menu payloads
            pub fn name(&self) -> &'static str {
                match self {
                    $(MenuIcon::$variant => stringify!($variant)),+
                }
            }

            /// Identifier in the lucide icon set used by the renderer
            pub fn lucide_id(&self) -> &'static str {
                match self {
                    $(MenuIcon::$variant => $lucide),+
                }
            }

            fn from_canonical(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(MenuIcon::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

menu_icons! {
    AlertCircle => "alert-circle",
    Award => "award",
    Badge => "badge",
    Bell => "bell",
    Bitcoin => "bitcoin",
    Bolt => "bolt",
    Book => "book",
    Briefcase => "briefcase",
    Building => "building",
    Building2 => "building-2",
    CalendarCheck => "calendar-check",
    Captions => "captions",
    Check => "check",
    CheckCircle => "check-circle",
    ChevronLeft => "chevron-left",
    ChevronRight => "chevron-right",
    ChevronsUpDown => "chevrons-up-down",
    Circle => "circle",
    Code => "code",
    Codepen => "codepen",
    Coffee => "coffee",
    Euro => "euro",
    Eye => "eye",
    File => "file",
    FileQuestion => "file-question",
    FileText => "file-text",
    Flag => "flag",
    Ghost => "ghost",
    Gift => "gift",
    Grid => "grid",
    Heart => "heart",
    HelpCircle => "help-circle",
    Image => "image",
    Info => "info",
    Kanban => "kanban",
    Key => "key",
    Layout => "layout",
    LayoutGrid => "layout-grid",
    LifeBuoy => "life-buoy",
    Mail => "mail",
    MessageSquare => "message-square",
    Monitor => "monitor",
    Network => "network",
    Pencil => "pencil",
    Plus => "plus",
    Plug => "plug",
    Search => "search",
    Send => "send",
    Settings => "settings",
    Share2 => "share-2",
    Shield => "shield",
    ShieldOff => "shield-off",
    ShieldUser => "shield-user",
    ShoppingCart => "shopping-cart",
    SquareCode => "square-code",
    SquareMousePointer => "square-mouse-pointer",
    Star => "star",
    Theater => "theater",
    ThumbsDown => "thumbs-down",
    ThumbsUp => "thumbs-up",
    Trash2 => "trash-2",
    TrendingUp => "trending-up",
    User => "user",
    UserCheck => "user-check",
    UserCircle => "user-circle",
    Users => "users",
    Zap => "zap",
    BarChart3 => "bar-chart-3",
    BarChart2 => "bar-chart-2",
    CloudCog => "cloud-cog",
    FileInput => "file-input",
    CircleCheck => "circle-check",
    ScrollText => "scroll-text",
}

impl MenuIcon {
    /// Resolve a payload icon name, including the legacy aliases
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "PeopleIcon" => Some(MenuIcon::Users),
            "WorkIcon" => Some(MenuIcon::Briefcase),
            "DocumentIcon" => Some(MenuIcon::File),
            other => Self::from_canonical(other),
        }
    }

    /// Like [`MenuIcon::lookup`], but logs unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        let icon = Self::lookup(name);
        if icon.is_none() {
            tracing::warn!("Unknown icon: {}", name);
        }
        icon
    }
}

impl fmt::Display for MenuIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MenuIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
