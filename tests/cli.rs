use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::process::{Command, Stdio};

#[test]
fn rejects_non_numeric_port_before_binding() {
    let output = Command::new(env!("CARGO_BIN_EXE_cors-serve"))
        .arg("abc")
        .output()
        .expect("Failed to execute cors-serve");

    assert!(!output.status.success(), "cors-serve accepted port 'abc'");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("Server running"),
        "server started despite invalid port: {stdout}"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("abc"), "Missing diagnostic: {stderr}");
}

#[test]
fn serves_working_directory_with_cors_headers() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("index.html"), "<p>it works</p>").unwrap();

    // Port 0 lets the OS pick a free port; the startup line reports it
    let mut child = Command::new(env!("CARGO_BIN_EXE_cors-serve"))
        .arg("0")
        .current_dir(root.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start cors-serve");

    let stdout = child.stdout.take().unwrap();
    let mut first_line = String::new();
    BufReader::new(stdout).read_line(&mut first_line).unwrap();

    let result = std::panic::catch_unwind(|| {
        let url = first_line
            .trim()
            .strip_prefix("Server running at ")
            .unwrap_or_else(|| panic!("Unexpected startup line: {first_line}"));
        let port: u16 = url
            .trim_start_matches("http://localhost:")
            .trim_end_matches('/')
            .parse()
            .unwrap();

        let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
        assert!(response.contains("\r\nContent-Type: text/html\r\n"));
        assert!(response.contains("\r\nAccess-Control-Allow-Origin: *\r\n"));
        assert!(response.contains("\r\nAccess-Control-Allow-Methods: GET, POST, OPTIONS\r\n"));
        assert!(response.contains("\r\nAccess-Control-Allow-Headers: Content-Type\r\n"));
        assert!(response.ends_with("<p>it works</p>"));
    });

    let _ = child.kill();
    let _ = child.wait();

    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}
