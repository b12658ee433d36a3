use crate::domain::image::Image;
use crate::domain::product::Product;
use crate::domain::types::ImageId;
use crate::forms::images::{UpdateImageFormPayload, UploadImagesFormPayload};
use crate::pagination::Paginated;
use crate::repository::{AssociationReader, ImageReader, ImageWriter, ListQuery};
use crate::storage::ImageStore;

use super::{ServiceError, ServiceResult, map_repository_error, pagination_params};

fn parse_id(id: i32) -> ServiceResult<ImageId> {
    ImageId::new(id).map_err(|_| ServiceError::Validation("ID must be greater than 0.".into()))
}

pub fn list_images<R>(
    page: Option<usize>,
    size: Option<i64>,
    repo: &R,
) -> ServiceResult<Paginated<Image>>
where
    R: ImageReader,
{
    let pagination = pagination_params(page, size)?;

    let query = ListQuery::default().paginate(pagination.page, pagination.per_page);
    match repo.list_images(query) {
        Ok((total, items)) => Ok(Paginated::new(items, total, pagination)),
        Err(e) => Err(map_repository_error("list images", e)),
    }
}

pub fn get_image<R>(id: i32, repo: &R) -> ServiceResult<Image>
where
    R: ImageReader,
{
    let id = parse_id(id)?;

    match repo.get_image_by_id(id) {
        Ok(Some(image)) => Ok(image),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(map_repository_error("get the image", e)),
    }
}

/// The image together with its associated products; the route decides how to
/// render an empty set.
pub fn image_products<R>(id: i32, repo: &R) -> ServiceResult<(Image, Vec<Product>)>
where
    R: ImageReader + AssociationReader,
{
    let id = parse_id(id)?;

    let image = match repo.get_image_by_id(id) {
        Ok(Some(image)) => image,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the image", e)),
    };

    let products = repo
        .list_image_products(id)
        .map_err(|e| map_repository_error("list image products", e))?;

    Ok((image, products))
}

/// Persist each uploaded file and insert one image row per file.
///
/// All row inserts share one transaction. When any step fails, every file
/// already written by this call is removed again so no stored file ends up
/// referenced by nothing.
pub fn create_images<R, S>(
    payload: UploadImagesFormPayload,
    repo: &R,
    store: &S,
) -> ServiceResult<Vec<Image>>
where
    R: ImageWriter,
    S: ImageStore,
{
    let mut written: Vec<&str> = Vec::with_capacity(payload.files.len());

    let cleanup = |store: &S, written: &[&str]| {
        for name in written {
            if let Err(e) = store.delete(name) {
                log::error!("Failed to remove stored file {name} after rollback: {e}");
            }
        }
    };

    for file in &payload.files {
        if let Err(e) = store.save(file.stored_name.as_str(), &file.bytes) {
            log::error!("Failed to store uploaded image: {e}");
            cleanup(store, &written);
            return Err(ServiceError::Internal);
        }
        written.push(file.stored_name.as_str());
    }

    let rows = payload
        .files
        .iter()
        .map(|file| payload.new_image(file))
        .collect::<Vec<_>>();

    match repo.create_images(&rows) {
        Ok(created) => Ok(created),
        Err(e) => {
            cleanup(store, &written);
            Err(map_repository_error("create the image", e))
        }
    }
}

/// Replace an image's fields and, when a new file was uploaded, its stored
/// file.
///
/// The new file is written before the row moves and the old file is removed
/// only after the row update committed, so the row never points at a file
/// the store does not hold. A failed removal of the old file leaves an
/// orphan, which is logged and tolerated.
pub fn update_image<R, S>(
    id: i32,
    payload: UpdateImageFormPayload,
    repo: &R,
    store: &S,
) -> ServiceResult<Image>
where
    R: ImageReader + ImageWriter,
    S: ImageStore,
{
    let id = parse_id(id)?;

    let existing = match repo.get_image_by_id(id) {
        Ok(Some(image)) => image,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the image", e)),
    };

    let Some(file) = payload.file else {
        return repo
            .update_image(id, &payload.name, payload.enable, None)
            .map_err(|e| map_repository_error("update the image", e));
    };

    if let Err(e) = store.save(file.stored_name.as_str(), &file.bytes) {
        log::error!("Failed to store replacement image file: {e}");
        return Err(ServiceError::Internal);
    }

    let updated = match repo.update_image(id, &payload.name, payload.enable, Some(&file.stored_name))
    {
        Ok(updated) => updated,
        Err(e) => {
            // Roll the file write back; the row still points at the old file.
            if let Err(cleanup_err) = store.delete(file.stored_name.as_str()) {
                log::error!(
                    "Failed to remove stored file {} after rollback: {cleanup_err}",
                    file.stored_name
                );
            }
            return Err(map_repository_error("update the image", e));
        }
    };

    if let Err(e) = store.delete(existing.file.as_str()) {
        log::error!(
            "Replaced image {id} but could not delete old stored file {}: {e}",
            existing.file
        );
    }

    Ok(updated)
}

/// Delete an image: stored file first, then product links and the row in one
/// transaction.
///
/// A failed file delete aborts the whole operation with the row retained. If
/// the row delete fails after the file was removed, the file is already gone;
/// the ordering favors "no dangling file reference" over "no lost file".
pub fn delete_image<R, S>(id: i32, repo: &R, store: &S) -> ServiceResult<Image>
where
    R: ImageReader + ImageWriter,
    S: ImageStore,
{
    let id = parse_id(id)?;

    let image = match repo.get_image_by_id(id) {
        Ok(Some(image)) => image,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(map_repository_error("get the image", e)),
    };

    if let Err(e) = store.delete(image.file.as_str()) {
        log::error!("Failed to delete stored file for image {id}, keeping the row: {e}");
        return Err(ServiceError::Internal);
    }

    match repo.delete_image(id) {
        Ok(_) => Ok(image),
        Err(e) => Err(map_repository_error("delete the image", e)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::types::{ImageName, StoredFileName};
    use crate::forms::images::UploadedImage;
    use crate::repository::test::TestRepository;
    use crate::storage::StorageError;
    use chrono::DateTime;

    /// In-memory store with injectable failures.
    #[derive(Default)]
    struct MockStore {
        saved: Mutex<Vec<String>>,
        deleted: Mutex<Vec<String>>,
        fail_delete: bool,
        fail_save: bool,
    }

    impl MockStore {
        fn saved(&self) -> Vec<String> {
            self.saved.lock().unwrap().clone()
        }

        fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    impl ImageStore for MockStore {
        fn save(&self, file_name: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            if self.fail_save {
                return Err(StorageError::Write {
                    name: file_name.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.saved.lock().unwrap().push(file_name.to_string());
            Ok(())
        }

        fn delete(&self, file_name: &str) -> Result<(), StorageError> {
            if self.fail_delete {
                return Err(StorageError::Delete {
                    name: file_name.to_string(),
                    source: std::io::Error::other("permission denied"),
                });
            }
            self.deleted.lock().unwrap().push(file_name.to_string());
            Ok(())
        }
    }

    fn sample_image(id: i32, file: &str) -> Image {
        Image {
            id: ImageId::new(id).unwrap(),
            name: ImageName::new("Banner").unwrap(),
            file: StoredFileName::new(file).unwrap(),
            enable: true,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn upload(name: &str) -> UploadedImage {
        UploadedImage {
            stored_name: StoredFileName::new(name).unwrap(),
            bytes: b"bytes".to_vec(),
        }
    }

    fn upload_payload(files: Vec<UploadedImage>) -> UploadImagesFormPayload {
        UploadImagesFormPayload {
            name: ImageName::new("Banner").unwrap(),
            enable: true,
            files,
        }
    }

    #[test]
    fn creates_one_row_per_file() {
        let repo = TestRepository::new();
        let store = MockStore::default();
        let payload = upload_payload(vec![upload("1-0-a.png"), upload("1-1-b.png")]);

        let created = create_images(payload, &repo, &store).unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(store.saved(), vec!["1-0-a.png", "1-1-b.png"]);
        assert!(created.iter().all(|i| i.name == "Banner" && i.enable));
        assert_ne!(created[0].file, created[1].file);
    }

    #[test]
    fn failed_store_write_creates_no_rows() {
        let repo = TestRepository::new();
        let store = MockStore {
            fail_save: true,
            ..MockStore::default()
        };
        let payload = upload_payload(vec![upload("1-0-a.png")]);

        let err = create_images(payload, &repo, &store).unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert_eq!(list_images(None, None, &repo).unwrap().total, 0);
    }

    #[test]
    fn delete_with_failing_store_keeps_the_row() {
        let repo = TestRepository::new().with_images(vec![sample_image(1, "1-0-a.png")]);
        let store = MockStore {
            fail_delete: true,
            ..MockStore::default()
        };

        let err = delete_image(1, &repo, &store).unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert!(get_image(1, &repo).is_ok());
    }

    #[test]
    fn delete_removes_file_and_row() {
        let repo = TestRepository::new().with_images(vec![sample_image(1, "1-0-a.png")]);
        let store = MockStore::default();

        let removed = delete_image(1, &repo, &store).unwrap();
        assert_eq!(removed.file, "1-0-a.png");
        assert_eq!(store.deleted(), vec!["1-0-a.png"]);
        assert_eq!(get_image(1, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn update_without_file_only_touches_fields() {
        let repo = TestRepository::new().with_images(vec![sample_image(1, "1-0-a.png")]);
        let store = MockStore::default();
        let payload = UpdateImageFormPayload {
            name: ImageName::new("Hero").unwrap(),
            enable: false,
            file: None,
        };

        let updated = update_image(1, payload, &repo, &store).unwrap();
        assert_eq!(updated.name.as_str(), "Hero");
        assert!(!updated.enable);
        assert_eq!(updated.file, "1-0-a.png");
        assert!(store.saved().is_empty());
        assert!(store.deleted().is_empty());
    }

    #[test]
    fn update_with_file_replaces_stored_file_after_the_row_moves() {
        let repo = TestRepository::new().with_images(vec![sample_image(1, "1-0-a.png")]);
        let store = MockStore::default();
        let payload = UpdateImageFormPayload {
            name: ImageName::new("Hero").unwrap(),
            enable: true,
            file: Some(upload("2-0-b.png")),
        };

        let updated = update_image(1, payload, &repo, &store).unwrap();
        assert_eq!(updated.file, "2-0-b.png");
        assert_eq!(store.saved(), vec!["2-0-b.png"]);
        assert_eq!(store.deleted(), vec!["1-0-a.png"]);
    }
}
