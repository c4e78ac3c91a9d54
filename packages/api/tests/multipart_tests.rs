//! Streaming multipart uploads

mod common;

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;
use httptester::{ErrorCollector, RequestBuilder};
use tokio_util::io::StreamReader;

use common::RecordingTransport;

#[tokio::test]
async fn fields_precede_the_file_part() {
    let transport = RecordingTransport::new();
    let collector = ErrorCollector::new();

    let mut request = RequestBuilder::new("http://mock", Arc::clone(&transport), collector.sink())
        .post("/upload")
        .multipart_file("document", "notes.txt", &b"line one\nline two"[..], [("owner", "ann"), ("tag", "x")]);
    let content_type = request.header_map()["content-type"]
        .to_str()
        .expect("ascii")
        .to_owned();
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("boundary parameter")
        .to_owned();

    request.execute().await.expect("response").assert_status(&[200]);

    let body = String::from_utf8(transport.last().body).expect("utf8 body");
    let owner = body.find("name=\"owner\"").expect("owner field");
    let tag = body.find("name=\"tag\"").expect("tag field");
    let file = body
        .find("name=\"document\"; filename=\"notes.txt\"")
        .expect("file part");
    assert!(owner < tag && tag < file);
    assert!(body.starts_with(&format!("--{boundary}\r\n")));
    assert!(body.contains("\r\n\r\nline one\nline two\r\n"));
    assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    assert!(collector.is_empty(), "{:?}", collector.messages());
}

#[tokio::test]
async fn read_error_surfaces_as_transport_error() {
    let transport = RecordingTransport::new();
    let collector = ErrorCollector::new();
    let content = StreamReader::new(stream::iter(vec![
        Ok(Bytes::from_static(b"first half")),
        Err(io::Error::other("disk unplugged")),
    ]));

    let resp = RequestBuilder::new("http://mock", Arc::clone(&transport), collector.sink())
        .post("/upload")
        .multipart_file("file", "big.bin", content, [("k", "v")])
        .execute()
        .await;

    assert!(resp.is_none());
    assert!(transport.dispatched.lock().unwrap().is_empty());
    let errors = collector.take();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_transport());
    assert!(errors[0].transport_error().is_some_and(|e| e.is_body()));
    assert!(errors[0].to_string().contains("disk unplugged"), "{}", errors[0]);
}

#[tokio::test]
async fn second_execute_sends_no_multipart_body() {
    let transport = RecordingTransport::new();
    let collector = ErrorCollector::new();

    let mut request = RequestBuilder::new("http://mock", Arc::clone(&transport), collector.sink())
        .post("/upload")
        .multipart_file("file", "a.txt", &b"abc"[..], Vec::<(String, String)>::new());

    request.execute().await.expect("first response");
    assert!(!transport.last().body.is_empty());

    request.execute().await.expect("second response");
    assert!(transport.last().body.is_empty());
}
