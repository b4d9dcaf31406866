//! HTTP behavior of the render service client against loopback servers.
//!
//! These tests stand in for the real containerized service with a
//! `TcpListener` serving canned responses, so no docker is required.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use chartust_common::error::ChartustError;
use chartust_common::types::{ChartSeries, DataPoint, LineChartRequest, RequestId};
use chartust_options::line_chart_option;
use chartust_render::service::{RenderPayload, poll_until_healthy, post_render, probe_health};

/// Binds an ephemeral port, answers the first request with `response`, and
/// returns the base URL.
fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let _handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

/// Returns a URL on a port that nothing is listening on.
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);
    format!("http://{addr}")
}

fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .expect("client build failed")
}

fn sample_payload() -> RenderPayload {
    let request = LineChartRequest {
        label: "CPU".into(),
        axis_color: "#ffffff".into(),
        line: ChartSeries {
            label: "cpu".into(),
            color: "#ff0000".into(),
            points: vec![
                DataPoint {
                    x: chrono::Utc::now(),
                    y: 1.0,
                },
                DataPoint {
                    x: chrono::Utc::now(),
                    y: 2.0,
                },
            ],
        },
    };
    RenderPayload {
        request_id: RequestId::generate(),
        style: "telemetry:line".into(),
        data: line_chart_option(&request),
    }
}

#[test]
fn health_probe_accepts_success_response() {
    let url = serve_once("HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
    assert!(probe_health(&client(), &url));
}

#[test]
fn health_probe_rejects_server_error() {
    let url = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    );
    assert!(!probe_health(&client(), &url));
}

#[test]
fn health_probe_rejects_refused_connection() {
    assert!(!probe_health(&client(), &refused_url()));
}

#[test]
fn poll_against_dead_service_exhausts_attempts() {
    let url = refused_url();
    let http = client();
    let err = poll_until_healthy(|| probe_health(&http, &url), 3, Duration::ZERO)
        .expect_err("poll should exhaust");
    assert!(matches!(
        err,
        ChartustError::ServiceUnavailable { attempts: 3 }
    ));
}

#[test]
fn render_success_returns_response_bytes() {
    let url = serve_once(
        "HTTP/1.1 200 OK\r\ncontent-length: 8\r\nconnection: close\r\n\r\nfake-png",
    );
    let bytes = post_render(&client(), &url, &sample_payload()).expect("render failed");
    assert_eq!(bytes, b"fake-png");
}

#[test]
fn render_error_body_is_surfaced_in_message() {
    let url = serve_once(
        "HTTP/1.1 400 Bad Request\r\ncontent-length: 11\r\nconnection: close\r\n\r\nbad request",
    );
    let err = post_render(&client(), &url, &sample_payload()).expect_err("render should fail");
    assert!(matches!(err, ChartustError::RenderFailed { .. }));
    assert!(err.to_string().contains("bad request"));
}

#[test]
fn render_network_failure_propagates_transport_error() {
    let err =
        post_render(&client(), &refused_url(), &sample_payload()).expect_err("render should fail");
    assert!(matches!(err, ChartustError::Http { .. }));
}
