//! 列表存储与后端同步的测试

use clinic_client::{ApiError, ApiProvider, ResourceStore};
use clinic_core::Identified;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn patient(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Paciente",
        "lastName": id,
        "documentId": format!("DOC-{}", id),
        "birthDate": "1990-05-05",
        "gender": "otro"
    })
}

#[tokio::test]
async fn test_delete_removes_exactly_that_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/patients"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([patient("1"), patient("2"), patient("3")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/patients/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ApiProvider::new(&format!("{}/api/v1", server.uri())).unwrap();
    let mut store = ResourceStore::new(provider.patients().clone());

    store.load().await.unwrap();
    assert_eq!(store.items().len(), 3);

    store.delete("2").await.unwrap();
    let ids: Vec<&str> = store.items().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert!(!store.list().loading);
    assert!(store.list().error.is_none());
}

#[tokio::test]
async fn test_failed_delete_keeps_list_and_records_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient("1")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/patients/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Tiene citas activas" })))
        .mount(&server)
        .await;

    let provider = ApiProvider::new(&format!("{}/api/v1", server.uri())).unwrap();
    let mut store = ResourceStore::new(provider.patients().clone());
    store.load().await.unwrap();

    let err = store.delete("1").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 409, .. }));
    assert_eq!(store.items().len(), 1);
    assert_eq!(
        store.list().error.as_deref(),
        Some("Error al eliminar el paciente con ID 1")
    );
}

#[tokio::test]
async fn test_load_failure_and_detail_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/invoices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/invoices/inv-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Factura no encontrada" })))
        .mount(&server)
        .await;

    let provider = ApiProvider::new(&format!("{}/api/v1", server.uri())).unwrap();
    let mut store = ResourceStore::new(provider.invoices().clone());

    let err = store.load().await.unwrap_err();
    assert_eq!(err.to_string(), "Error de servidor 500");
    assert_eq!(store.list().error.as_deref(), Some("Error al cargar las facturas"));
    assert!(!store.list().loading);

    let err = store.fetch("inv-404").await.unwrap_err();
    assert_eq!(err.to_string(), "Factura no encontrada");
    assert!(store.detail().item.is_none());
    assert_eq!(
        store.detail().error.as_deref(),
        Some("Error al obtener la factura con ID inv-404")
    );
}

#[tokio::test]
async fn test_create_and_update_sync_local_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([patient("1")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/patients"))
        .respond_with(ResponseTemplate::new(201).set_body_json(patient("2")))
        .mount(&server)
        .await;
    let mut renamed = patient("1");
    renamed["name"] = json!("Renombrado");
    Mock::given(method("PUT"))
        .and(path("/api/v1/patients/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(renamed))
        .mount(&server)
        .await;

    let provider = ApiProvider::new(&format!("{}/api/v1", server.uri())).unwrap();
    let mut store = ResourceStore::new(provider.patients().clone());
    store.load().await.unwrap();

    let new_patient: clinic_core::CreatePatient = serde_json::from_value(json!({
        "name": "Paciente",
        "lastName": "2",
        "documentId": "DOC-2",
        "birthDate": "1990-05-05",
        "gender": "otro"
    }))
    .unwrap();
    store.create(&new_patient).await.unwrap();
    assert_eq!(store.items().len(), 2);

    let update = clinic_core::UpdatePatient {
        id: "1".to_string(),
        name: Some("Renombrado".to_string()),
        ..Default::default()
    };
    store.update("1", &update).await.unwrap();
    assert_eq!(store.list().find("1").map(|p| p.name.as_str()), Some("Renombrado"));
    assert_eq!(store.items().len(), 2);
}
