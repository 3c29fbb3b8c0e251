use std::io::{self, Write};

use bytes::Bytes;

use crate::http::response::Response;

/// Serialises the status line and headers, terminated by the blank line.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.extend_from_slice(resp.status_line().as_bytes());
    buf.extend_from_slice(b"\r\n");

    for header in &resp.headers {
        buf.extend_from_slice(header.key.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(header.value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes a response as two sends: the head, then the body when there is one.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Bytes,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            head: serialize_head(response),
            body: response.body.clone(),
        }
    }

    pub fn head(&self) -> &[u8] {
        &self.head
    }

    pub fn write_to_stream<W: Write>(&self, stream: &mut W) -> io::Result<()> {
        stream.write_all(&self.head)?;

        if !self.body.is_empty() {
            stream.write_all(&self.body)?;
        }

        stream.flush()
    }
}
