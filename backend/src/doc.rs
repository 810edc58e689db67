//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the order endpoints and health checks
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`OrderSchema`], [`OrderStateSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::orders::{ClaimResponse, CreateOrderRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, OrderSchema, OrderStateSchema};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order service API",
        description = "Create delivery orders, list them page by page, and claim them exactly once."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::claim_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        OrderSchema,
        OrderStateSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateOrderRequest,
        ClaimResponse
    )),
    tags(
        (name = "orders", description = "Order lifecycle operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const ORDER_SCHEMA_NAME: &str = "crate.domain.Order";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_order_and_health_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        let orders = paths.get("/orders").expect("/orders path");
        assert!(orders.get.is_some(), "list operation");
        assert!(orders.post.is_some(), "create operation");
        let claim = paths.get("/orders/{id}").expect("/orders/{id} path");
        assert!(claim.patch.is_some(), "claim operation");
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/health/live"));
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_order_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let order_schema = schemas.get(ORDER_SCHEMA_NAME).expect("Order schema");

        assert_object_schema_has_field(order_schema, "id");
        assert_object_schema_has_field(order_schema, "distance");
        assert_object_schema_has_field(order_schema, "status");
    }
}
