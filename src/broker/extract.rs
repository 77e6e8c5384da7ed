//! Container name extraction from deployment files.

/// Token marking a container name declaration.
pub const CONTAINER_NAME_TOKEN: &str = "container_name:";

/// Return the container names declared in a deployment file.
///
/// Purely line based: each line containing [`CONTAINER_NAME_TOKEN`]
/// contributes the trimmed text after the token. Names keep file order and
/// are not deduplicated.
pub fn extract_container_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| line.contains(CONTAINER_NAME_TOKEN))
        .filter_map(|line| line.rsplit(CONTAINER_NAME_TOKEN).next())
        .map(|rest| rest.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_file_order_trimmed() {
        let contents = "services:\n  orion:\n    container_name: orion-ld\n    image: fiware/orion-ld\n  mongo:\n  container_name:mongo-db  \n";
        assert_eq!(
            extract_container_names(contents),
            vec!["orion-ld".to_string(), "mongo-db".to_string()]
        );
    }

    #[test]
    fn test_no_declarations() {
        assert!(extract_container_names("services:\n  web:\n    image: nginx\n").is_empty());
        assert!(extract_container_names("").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let contents = "container_name: a\ncontainer_name: a\n";
        assert_eq!(extract_container_names(contents), vec!["a", "a"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let contents = "container_name: orion-ld\r\ncontainer_name: mongo-db\r\n";
        assert_eq!(extract_container_names(contents), vec!["orion-ld", "mongo-db"]);
    }

    #[test]
    fn test_takes_text_after_last_token() {
        assert_eq!(
            extract_container_names("# container_name: old container_name: new"),
            vec!["new"]
        );
    }
}
