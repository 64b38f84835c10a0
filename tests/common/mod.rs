//! Cloudflare response bodies shared by the integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";
pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";

/// Successful envelope without pagination info
pub fn ok(result: Value) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

/// Successful envelope for one page of a listing
pub fn page(result: Value, page: u32, total_pages: u32) -> Value {
    let count = result.as_array().map_or(0, Vec::len);
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
        "result_info": {
            "page": page,
            "per_page": 100,
            "count": count,
            "total_count": count,
            "total_pages": total_pages
        }
    })
}

pub fn failure(code: i64, message: &str) -> Value {
    json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null
    })
}

pub fn zone(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "status": "active" })
}

pub fn a_record(id: &str, name: &str, content: &str, proxied: bool) -> Value {
    json!({
        "id": id,
        "zone_id": ZONE_ID,
        "zone_name": "example.com",
        "name": name,
        "type": "A",
        "content": content,
        "proxiable": true,
        "proxied": proxied,
        "ttl": 1
    })
}
