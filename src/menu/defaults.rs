use super::icons::MenuIcon;
use super::types::MenuNode;

/// Bundled sidebar used before login and whenever the remote menu is unusable
pub fn default_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::link("Dashboard", "/dashboard").with_icon(MenuIcon::LayoutGrid),
        MenuNode::heading("Access Control"),
        MenuNode::link("User Management", "/access-control/user-management").with_icon(MenuIcon::Users),
        MenuNode::link("Role Management", "/access-control/role-management").with_icon(MenuIcon::ShieldUser),
        MenuNode::link("Company Management", "/access-control/company-management")
            .with_icon(MenuIcon::Building2),
        MenuNode::link("Menu Management", "/access-control/menu-management").with_icon(MenuIcon::Kanban),
        MenuNode::heading("User"),
        MenuNode::group(
            "Account",
            vec![
                MenuNode::link("User Profile", "/account/home/user-profile"),
                MenuNode::link("Settings", "/account/home/settings-plain"),
            ],
        )
        .with_icon(MenuIcon::Settings),
        MenuNode::group(
            "Network",
            vec![
                MenuNode::link("Team Crew", "/network/user-table/team-crew"),
                MenuNode::link("App Roster", "/network/user-table/app-roster"),
                MenuNode::link("Market Authors", "/network/user-table/market-authors"),
                MenuNode::link("SaaS Users", "/network/user-table/saas-users"),
            ],
        )
        .with_icon(MenuIcon::Network)
        .collapsible(),
    ]
}
