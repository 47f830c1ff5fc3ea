use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use futures_util::TryStreamExt;
use uuid::Uuid;

use koji_admin::common::{BackendError, UploadError};
use koji_admin::models::{
    Product, ProductCategory, ProductDraft, ProductUnit,
};
use koji_admin::services::{
    AssetUploader, CollectionBrowser, Confirmation, DeleteOutcome, FileUpload,
    ImageField, MAX_UPLOAD_BYTES, RecordCache, RecordEditor,
};

use crate::web::forms::{DeleteForm, SearchQuery};
use crate::web::helpers::{redirect, render};
use crate::web::nav::Shell;
use crate::web::session::AdminSession;
use crate::web::state::AppState;
use crate::web::templates::{
    ImageFieldTemplate, ProductDeleteTemplate, ProductsTemplate,
};

const PRODUCTS_PATH: &str = "/dashboard/products";

/// Same bound as the urlencoded form extractor's default.
const MAX_TEXT_BYTES: usize = 16 * 1024;

/// Everything on the products page besides the catalog itself.
#[derive(Default)]
struct PageState {
    query: String,
    notice: Option<String>,
    error: Option<String>,
    form: ProductDraft,
    form_open: bool,
}

async fn load_catalog(
    state: &AppState,
    session: &AdminSession,
) -> Result<RecordCache<Product>, BackendError> {
    CollectionBrowser::new(state.backend.as_ref(), &session.token)
        .newest_first::<Product>()
        .await
        .map(RecordCache::new)
        .inspect_err(|e| log::error!("Failed to list products: {}", e))
}

fn render_page(
    session: &AdminSession,
    catalog: &Result<RecordCache<Product>, BackendError>,
    page: PageState,
) -> HttpResponse {
    let (products, total, load_error) = match catalog {
        Ok(cache) => (cache.filtered(&page.query), cache.len(), None),
        Err(e) => (Vec::new(), 0, Some(e.to_string())),
    };

    render(ProductsTemplate {
        shell: Shell::new(session, PRODUCTS_PATH),
        products,
        total,
        query: &page.query,
        load_error,
        notice: page.notice,
        error: page.error,
        image_url: page.form.image_url.clone(),
        image_error: None,
        form: page.form,
        form_open: page.form_open,
        units: &ProductUnit::ALL,
        categories: &ProductCategory::ALL,
    })
}

#[get("/products")]
pub async fn products_list(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let session = session.into_inner();
    let catalog = load_catalog(&state, &session).await;
    render_page(
        &session,
        &catalog,
        PageState {
            query: query.term().to_string(),
            ..PageState::default()
        },
    )
}

#[post("/products")]
pub async fn products_create(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    form: web::Form<ProductDraft>,
) -> impl Responder {
    let session = session.into_inner();
    let draft = form.into_inner();

    let mut catalog = load_catalog(&state, &session).await;
    let mut detached = RecordCache::default();
    let cache = match catalog.as_mut() {
        Ok(cache) => cache,
        Err(_) => &mut detached,
    };

    let editor = RecordEditor::new(state.backend.as_ref(), &session.token);
    let created = editor
        .create(cache, &draft)
        .await
        .map(|product| product.name.clone());

    let page = match created {
        Ok(name) => PageState {
            notice: Some(format!("Added {name} to the catalog")),
            ..PageState::default()
        },
        Err(e) => {
            log::warn!("Product creation failed: {}", e);
            PageState {
                error: Some(e.to_string()),
                form: draft,
                form_open: true,
                ..PageState::default()
            }
        }
    };
    render_page(&session, &catalog, page)
}

#[get("/products/{id}/delete")]
pub async fn product_delete_confirm(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let session = session.into_inner();
    let id = path.into_inner();

    let catalog = load_catalog(&state, &session).await;
    let product = match &catalog {
        Ok(cache) => cache.get(id),
        Err(_) => return render_page(&session, &catalog, PageState::default()),
    };

    match product {
        Some(product) => render(ProductDeleteTemplate {
            shell: Shell::new(&session, req.path()),
            product,
        }),
        None => redirect(&req, PRODUCTS_PATH),
    }
}

#[post("/products/{id}/delete")]
pub async fn product_delete(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<DeleteForm>,
) -> impl Responder {
    let session = session.into_inner();
    let id = path.into_inner();

    let confirmation = Confirmation::from_form(form.confirm.as_deref());
    if confirmation == Confirmation::Declined {
        return redirect(&req, PRODUCTS_PATH);
    }

    let mut catalog = load_catalog(&state, &session).await;
    let name = catalog
        .as_ref()
        .ok()
        .and_then(|cache| cache.get(id))
        .map(|product| product.name.clone());
    let mut detached = RecordCache::default();
    let cache = match catalog.as_mut() {
        Ok(cache) => cache,
        Err(_) => &mut detached,
    };

    let editor = RecordEditor::new(state.backend.as_ref(), &session.token);
    let page = match editor.delete(cache, id, confirmation).await {
        Ok(DeleteOutcome::Deleted) => PageState {
            notice: Some(match name {
                Some(name) => format!("Deleted {name}"),
                None => "Deleted the product".to_string(),
            }),
            ..PageState::default()
        },
        Ok(DeleteOutcome::Declined) => PageState::default(),
        Err(e) => {
            log::warn!("Product deletion failed: {}", e);
            PageState {
                error: Some(e.to_string()),
                ..PageState::default()
            }
        }
    };
    render_page(&session, &catalog, page)
}

/// Reads a text part of the upload form, up to [`MAX_TEXT_BYTES`].
async fn read_text(field: &mut Field) -> Result<String, UploadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        if bytes.len() + chunk.len() > MAX_TEXT_BYTES {
            return Err(UploadError::Malformed(format!(
                "text field is larger than {MAX_TEXT_BYTES} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| UploadError::Malformed("text field is not UTF-8".into()))
}

/// Discards a part without buffering it.
async fn skip_part(field: &mut Field) -> Result<(), UploadError> {
    while field
        .try_next()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
        .is_some()
    {}
    Ok(())
}

async fn read_file(field: &mut Field) -> Result<FileUpload, UploadError> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();
    let content_type = field.content_type().map(|mime| mime.to_string());

    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: bytes.len() + chunk.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(FileUpload {
        file_name,
        content_type,
        bytes,
    })
}

/// Walks the multipart body. The product form's current `image_url` is kept
/// in `current_url` as soon as it is seen, so it survives a bad file part.
async fn read_upload(
    payload: &mut Multipart,
    current_url: &mut Option<String>,
) -> Result<Option<FileUpload>, UploadError> {
    let mut file = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image_url" => {
                *current_url = Some(read_text(&mut field).await?);
            }
            "file" => {
                file = Some(read_file(&mut field).await?);
            }
            _ => skip_part(&mut field).await?,
        }
    }

    Ok(file)
}

#[post("/products/image")]
pub async fn product_image_upload(
    state: web::Data<AppState>,
    session: web::ReqData<AdminSession>,
    mut payload: Multipart,
) -> impl Responder {
    let mut current_url = None;
    let received = read_upload(&mut payload, &mut current_url).await;
    let mut field = ImageField::new(current_url);

    match received {
        Ok(Some(file)) => {
            let uploader =
                AssetUploader::new(state.backend.as_ref(), &session.token);
            if let Ok(url) = uploader.upload(&mut field, file).await {
                log::info!("Product image available at {}", url);
            }
        }
        Ok(None) => {}
        Err(e) => {
            log::warn!("Rejected image upload: {}", e);
            field.finish(&Err(e));
        }
    }

    render(ImageFieldTemplate::from(&field))
}

/// Registers the catalog routes under the `/dashboard` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(product_image_upload)
        .service(products_list)
        .service(products_create)
        .service(product_delete_confirm)
        .service(product_delete);
}
