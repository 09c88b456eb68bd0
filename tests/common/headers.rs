use bunner_cors_policy::HeaderCollection;

pub fn header_value<'a>(headers: &'a HeaderCollection, name: &str) -> Option<&'a str> {
    headers.get(name)
}

pub fn has_header(headers: &HeaderCollection, name: &str) -> bool {
    headers.contains(name)
}

pub fn vary_values(headers: &HeaderCollection) -> Vec<String> {
    headers.vary()
}

pub fn access_control_headers(headers: &HeaderCollection) -> Vec<&str> {
    headers
        .iter()
        .map(|(name, _)| name)
        .filter(|name| name.to_ascii_lowercase().starts_with("access-control-"))
        .collect()
}
