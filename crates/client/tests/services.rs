//! Resource service accessors dispatching through the client.

mod support;

use std::sync::Arc;

use infusionsoft::{InfusionsoftError, ServiceKind, Value};
use support::{authorized_client_for, contact_ids_response, received_bodies, string_response};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn accessor_prefixes_method_with_service_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<methodName>ContactService.findByEmail</methodName>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(contact_ids_response(7), "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = authorized_client_for(&server);
    let result = client
        .contacts()
        .call("findByEmail", vec![Value::from("a@b.com"), Value::Array(vec![Value::from("Id")])])
        .await
        .expect("contacts");

    assert_eq!(result[0]["Id"], Value::Int(7));
}

#[tokio::test]
async fn service_can_skip_legacy_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<methodName>APIEmailService.optIn</methodName>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(string_response("ok"), "text/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = authorized_client_for(&server);
    client
        .emails()
        .skip_legacy_key()
        .call("optIn", vec![Value::from("a@b.com"), Value::from("reason")])
        .await
        .expect("opt in");

    assert!(!received_bodies(&server).await[0].contains("tok1"));
    assert!(client.needs_legacy_key());
}

#[tokio::test]
async fn service_by_name_accepts_both_spellings() {
    let server = MockServer::start().await;
    let mut client = authorized_client_for(&server);

    let by_accessor = Arc::clone(client.service_by_name("webForms").expect("accessor").descriptor());
    let by_remote = Arc::clone(client.service_by_name("WebFormService").expect("remote").descriptor());

    assert_eq!(by_accessor.kind(), ServiceKind::WebForms);
    assert!(Arc::ptr_eq(&by_accessor, &by_remote));
}

#[tokio::test]
async fn unknown_service_is_invalid_resource() {
    let server = MockServer::start().await;
    let mut client = authorized_client_for(&server);

    let err = client.service_by_name("widgets").unwrap_err();

    assert!(matches!(err, InfusionsoftError::InvalidResource(name) if name == "widgets"));
    assert!(client.services().is_empty());
}

#[tokio::test]
async fn every_accessor_maps_to_its_service() {
    let server = MockServer::start().await;
    let mut client = authorized_client_for(&server);

    let mut names = Vec::new();
    names.push(client.affiliate_programs().descriptor().name());
    names.push(client.affiliates().descriptor().name());
    names.push(client.contacts().descriptor().name());
    names.push(client.data().descriptor().name());
    names.push(client.discounts().descriptor().name());
    names.push(client.emails().descriptor().name());
    names.push(client.files().descriptor().name());
    names.push(client.funnels().descriptor().name());
    names.push(client.invoices().descriptor().name());
    names.push(client.orders().descriptor().name());
    names.push(client.products().descriptor().name());
    names.push(client.search().descriptor().name());
    names.push(client.shipping().descriptor().name());
    names.push(client.web_forms().descriptor().name());

    let expected: Vec<&str> = ServiceKind::ALL.iter().map(|kind| kind.service_name()).collect();
    assert_eq!(names, expected);
    assert_eq!(client.services().len(), ServiceKind::ALL.len());
}
