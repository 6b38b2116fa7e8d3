//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Products API",
    description = "Product catalog: look up products by name and add new ones",
    license(name = "MIT")
))]
struct ServiceInfo;

/// Products API document: service info plus the product operations.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceInfo::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
