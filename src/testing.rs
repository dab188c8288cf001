//! Shared fixtures for unit tests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::data::{PluginDocument, ValueStore};

pub const WILDFLY_YAML: &str = r#"
- url: http://localhost:9990/jolokia
  user: monitor
  password: secret
  graphs:
    wildfly_threads:
      graph_title: WildFly threads
      graph_category: wildfly
      graph_vlabel: threads
      graph_scale: no
      metrics:
        daemon:
          label: Daemon threads
          info: Threads not keeping the JVM alive
          resource: java.lang:type=Threading
          attribute: DaemonThreadCount
        count:
          label: Live threads
          warning: 500
          resource: java.lang:type=Threading
          attribute: ThreadCount
    wildfly_memory:
      graph_title: WildFly memory
      graph_vlabel: bytes
      graph_category: wildfly
      graph_args: "--base 1024 -l 0"
      graph_order: [heap_used, heap_max, nonheap_used, nonheap_max]
      metrics:
        heap_used:
          label: Heap used
          draw: AREA
          min: 0
          resource: java.lang:type=Memory
          attribute: HeapMemoryUsage
          path: used
        heap_max:
          label: Heap max
          colour: ff0000
          resource: java.lang:type=Memory
          attribute: HeapMemoryUsage
          path: max
        nonheap_used:
          label: Non-heap used
          draw: STACK
          resource: java.lang:type=Memory
          attribute: NonHeapMemoryUsage
          path: used
        nonheap_max:
          label: Non-heap max
          resource: java.lang:type=Memory
          attribute: NonHeapMemoryUsage
          path: max
"#;

pub const WILDFLY_VALUES: &str = r#"{
    "java.lang:type=Memory": {
        "HeapMemoryUsage": {"init": 67108864, "used": 268435456, "committed": 536870912, "max": 1073741824},
        "NonHeapMemoryUsage": {"init": 7667712, "used": 104857600, "committed": 120586240, "max": -1}
    },
    "java.lang:type=Threading": {
        "ThreadCount": 87,
        "DaemonThreadCount": 23
    }
}"#;

/// Two graphs: `wildfly_memory` (4 metrics) and `wildfly_threads` (2 metrics).
pub fn wildfly_document() -> PluginDocument {
    PluginDocument::parse(WILDFLY_YAML).unwrap()
}

/// Values for every metric of [`wildfly_document`].
pub fn wildfly_values() -> ValueStore {
    serde_json::from_str(WILDFLY_VALUES).unwrap()
}

/// Request head (lowercased) and JSON body as received by [`fake_agent`].
pub struct Received {
    pub head: String,
    pub body: serde_json::Value,
}

/// Stand-in Jolokia agent answering one request with `status` and `body`.
///
/// Returns the agent URL and a handle resolving to what the agent received.
pub async fn fake_agent(status: &'static str, body: &'static str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/jolokia", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let received = read_http_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        received
    });

    (url, handle)
}

async fn read_http_request(socket: &mut TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request was complete");
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if buf.len() >= end + 4 + length {
            let body = serde_json::from_slice(&buf[end + 4..end + 4 + length]).unwrap();
            return Received { head, body };
        }
    }
}
