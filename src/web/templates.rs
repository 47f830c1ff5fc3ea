use askama::Template;

use koji_admin::models::{
    DashboardStats, Product, ProductCategory, ProductDraft, ProductUnit,
    Quote, UserProfile,
};
use koji_admin::services::ImageField;

use crate::web::nav::Shell;

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub shell: Shell,
    pub stats: Option<DashboardStats>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate<'a> {
    pub shell: Shell,
    pub users: Vec<&'a UserProfile>,
    pub total: usize,
    pub query: &'a str,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/quotes.html")]
pub struct QuotesTemplate<'a> {
    pub shell: Shell,
    pub quotes: Vec<&'a Quote>,
    pub total: usize,
    pub query: &'a str,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate<'a> {
    pub shell: Shell,
    pub products: Vec<&'a Product>,
    pub total: usize,
    pub query: &'a str,
    pub load_error: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub form: ProductDraft,
    pub form_open: bool,
    pub units: &'static [ProductUnit],
    pub categories: &'static [ProductCategory],
    pub image_url: String,
    pub image_error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/product_delete.html")]
pub struct ProductDeleteTemplate<'a> {
    pub shell: Shell,
    pub product: &'a Product,
}

/// The image part of the product form, swapped in after an upload.
#[derive(Template)]
#[template(path = "admin/image_field.html")]
pub struct ImageFieldTemplate {
    pub image_url: String,
    pub image_error: Option<String>,
}

impl From<&ImageField> for ImageFieldTemplate {
    fn from(field: &ImageField) -> Self {
        Self {
            image_url: field.url().unwrap_or_default().to_string(),
            image_error: field.error().map(str::to_string),
        }
    }
}
