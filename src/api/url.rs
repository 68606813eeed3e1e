//! Module-aware URL construction.
//!
//! Endpoints live under `{base}/{module}{version}/{endpoint}`, e.g.
//! `http://localhost:8080/auth/api/v1/menus`.

/// Strip one trailing slash and make sure relative parts start with `/`
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.starts_with("http") || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Join URL parts; the first part is the base URL and only loses its trailing slash
pub fn join_url_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            if index == 0 {
                part.strip_suffix('/').unwrap_or(part).to_string()
            } else {
                normalize_path(part)
            }
        })
        .collect()
}

pub fn build_api_url(base_url: &str, module: &str, api_version: &str, endpoint: &str) -> String {
    join_url_parts(&[base_url, module, api_version, endpoint])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_module_urls() {
        assert_eq!(
            build_api_url("http://localhost:8080", "auth", "/api/v1", "menus"),
            "http://localhost:8080/auth/api/v1/menus"
        );
        assert_eq!(
            build_api_url("http://localhost:8080/", "auth", "api/v1/", "/users/paginate"),
            "http://localhost:8080/auth/api/v1/users/paginate"
        );
    }

    #[test]
    fn normalize_handles_edge_cases() {
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("menus/"), "/menus");
        assert_eq!(normalize_path("https://x.test/"), "https://x.test");
    }
}
