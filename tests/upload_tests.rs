mod common;

#[cfg(test)]
pub mod upload_tests {
    use super::common::*;

    use koji_admin::common::UploadError;
    use koji_admin::services::*;

    fn png(name: &str, size: usize) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89; size],
        }
    }

    #[tokio::test]
    async fn test_upload_sets_public_url() {
        let backend = MemoryBackend::new();
        let token = token();
        let mut field = ImageField::new(None);

        let url = AssetUploader::new(&backend, &token)
            .upload(&mut field, png("Facade.PNG", 512))
            .await
            .unwrap();

        let objects = backend.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].bucket, PRODUCT_IMAGES_BUCKET);
        assert_eq!(objects[0].content_type, "image/png");
        assert_eq!(objects[0].size, 512);
        assert!(objects[0].key.ends_with(".png"));

        assert_eq!(url, format!("{STORAGE_HOST}/products/{}", objects[0].key));
        assert_eq!(field.url(), Some(url.as_str()));
        assert_eq!(field.state(), UploadState::Idle);
        assert!(field.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_url() {
        let backend = MemoryBackend::new();
        backend.fail_storage("new row violates row-level security policy");
        let token = token();
        let mut field =
            ImageField::new(Some("https://cdn.example.com/old.jpg".into()));

        let err = AssetUploader::new(&backend, &token)
            .upload(&mut field, png("neuf.png", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Backend(_)));
        assert_eq!(field.url(), Some("https://cdn.example.com/old.jpg"));
        assert_eq!(
            field.error(),
            Some("new row violates row-level security policy")
        );
        assert_eq!(field.state(), UploadState::Idle);
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_no_op() {
        let backend = MemoryBackend::new();
        let token = token();
        let mut field = ImageField::new(Some("https://cdn.example.com/a.jpg".into()));

        let err = AssetUploader::new(&backend, &token)
            .upload(&mut field, png("", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::NoFile));
        assert_eq!(field.url(), Some("https://cdn.example.com/a.jpg"));
        assert!(field.error().is_none());
        assert_eq!(backend.calls().upload, 0);
    }

    #[tokio::test]
    async fn test_oversized_file_is_refused_locally() {
        let backend = MemoryBackend::new();
        let token = token();
        let mut field = ImageField::new(None);

        let err = AssetUploader::new(&backend, &token)
            .upload(&mut field, png("plan.png", MAX_UPLOAD_BYTES + 1))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert!(field.error().is_some());
        assert_eq!(backend.calls().upload, 0);
    }

    #[tokio::test]
    async fn test_same_file_twice_gets_distinct_keys() {
        let backend = MemoryBackend::new();
        let token = token();
        let uploader = AssetUploader::new(&backend, &token);
        let mut field = ImageField::new(None);

        let first = uploader
            .upload(&mut field, png("photo.jpg", 4))
            .await
            .unwrap();
        let second = uploader
            .upload(&mut field, png("photo.jpg", 4))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(field.url(), Some(second.as_str()));
    }

    #[tokio::test]
    async fn test_custom_bucket() {
        let backend = MemoryBackend::new();
        let token = token();
        let mut field = ImageField::new(None);

        AssetUploader::new(&backend, &token)
            .with_bucket("avatars")
            .upload(&mut field, png("me.webp", 4))
            .await
            .unwrap();

        assert_eq!(backend.objects()[0].bucket, "avatars");
    }

    #[test]
    fn test_second_upload_while_busy_is_refused() {
        let mut field = ImageField::new(None);
        field.begin().unwrap();

        assert!(matches!(field.begin(), Err(UploadError::Busy)));
        assert_eq!(field.state(), UploadState::Uploading);

        field.finish(&Ok("https://cdn.example.com/x.png".into()));
        assert_eq!(field.state(), UploadState::Idle);
        assert!(field.begin().is_ok());
    }

    #[test]
    fn test_object_key_shape() {
        let key = object_key("Devis Final.JPEG");
        let (id, ext) = key.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpeg");
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let bare = object_key("sans-extension");
        assert!(uuid::Uuid::parse_str(&bare).is_ok());

        let odd = object_key("archive.tar.gz?x=1");
        assert!(uuid::Uuid::parse_str(&odd).is_ok());
    }
}
