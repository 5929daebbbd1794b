use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use palisade::config::Config;
use palisade::http::request::Method;
use palisade::http::response::{ResponseBuilder, StatusCode};
use palisade::router::Router;
use palisade::server::Server;

fn spawn_server(router: Router, max_connections: usize) -> SocketAddr {
    let cfg = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        backlog: 16,
        max_connections,
    };
    let server = Server::bind(&cfg).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || {
        let _ = server.run(&router);
    });
    addr
}

/// One full client exchange: connect, send, read to server-side close.
fn exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .unwrap();
    stream.write_all(request).unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn serves_the_default_route() {
    let addr = spawn_server(Router::with_default_routes(), 8);

    let response = exchange(addr, b"GET / HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 13\r\n"));
    assert!(response.contains("Content-Type: text/plain; charset=us-ascii\r\n"));
    assert!(response.ends_with("Hello, World!"));
}

#[test]
fn unknown_route_is_not_found() {
    let addr = spawn_server(Router::with_default_routes(), 8);

    let response = exchange(addr, b"GET /no-such-route HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.ends_with("Not Found"));
}

#[test]
fn unrecognized_method_is_bad_request() {
    let addr = spawn_server(Router::with_default_routes(), 8);

    let response = exchange(addr, b"FOO / HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.ends_with("Bad Request"));
}

#[test]
fn post_body_reaches_the_route() {
    let mut router = Router::with_default_routes();
    router.register(Method::POST, "/echo", |req| {
        ResponseBuilder::new(StatusCode::Created)
            .body(Bytes::copy_from_slice(req.body))
            .build()
    });
    let addr = spawn_server(router, 8);

    let response = exchange(
        addr,
        b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    );

    assert!(response.starts_with("HTTP/1.1 201 Created\r\n"));
    assert!(response.contains("Content-Length: 5\r\n"));
    assert!(response.ends_with("hello"));
}

#[test]
fn connections_are_reaped_between_exchanges() {
    let addr = spawn_server(Router::with_default_routes(), 2);

    // Far more sequential exchanges than table slots; each one only
    // succeeds if the previous connection was reaped.
    for _ in 0..8 {
        let response = exchange(addr, b"GET / HTTP/1.1\r\n\r\n");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}

#[test]
fn interleaved_connections_are_both_served() {
    let addr = spawn_server(Router::with_default_routes(), 8);

    let mut first = TcpStream::connect(addr).unwrap();
    let mut second = TcpStream::connect(addr).unwrap();
    for stream in [&first, &second] {
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
    }

    second.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    first.write_all(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();

    let mut from_second = String::new();
    second.read_to_string(&mut from_second).unwrap();
    let mut from_first = String::new();
    first.read_to_string(&mut from_first).unwrap();

    assert!(from_second.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(from_first.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn accepts_beyond_capacity_are_shed() {
    let addr = spawn_server(Router::with_default_routes(), 1);

    // Occupy the only slot with a never-completing request.
    let mut occupant = TcpStream::connect(addr).unwrap();
    occupant.write_all(b"GET /slow HT").unwrap();
    thread::sleep(Duration::from_millis(300));

    // The next accept must be closed immediately, without a response.
    let mut rejected = TcpStream::connect(addr).unwrap();
    rejected
        .set_read_timeout(Some(Duration::from_secs(10)))
        .unwrap();
    let mut buf = Vec::new();
    let n = rejected.read_to_end(&mut buf).unwrap();

    assert_eq!(n, 0);
    drop(occupant);
}
