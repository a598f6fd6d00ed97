const RESIZED_BUCKET_SUFFIX: &str = "-resized";
const RESIZED_KEY_PREFIX: &str = "resized-";

/// The bucket thumbnails for `source_bucket` are written to. It must already exist.
pub fn destination_bucket(source_bucket: &str) -> String {
    format!("{source_bucket}{RESIZED_BUCKET_SUFFIX}")
}

/// The key a thumbnail of `source_key` is written under, given the decoded source key.
pub fn destination_key(source_key: &str) -> String {
    format!("{RESIZED_KEY_PREFIX}{source_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_names() {
        assert_eq!(destination_bucket("mybucket"), "mybucket-resized");
        assert_eq!(destination_key("HappyFace.jpg"), "resized-HappyFace.jpg");
    }

    #[test]
    fn test_destination_key_keeps_prefixes() {
        assert_eq!(
            destination_key("photos/2024/a b.png"),
            "resized-photos/2024/a b.png"
        );
    }
}
