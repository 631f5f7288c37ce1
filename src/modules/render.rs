use chrono::Local;
use std::fmt::Display;

use crate::core::types::{PortTarget, ScanResult, ADDRESS_ROW_WIDTH, PORT_ROW_WIDTH};
use crate::utils::helpers::chunk_rows;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:1.5em}\
td{border:1px solid #ccc;padding:4px 8px;font-family:monospace}\
.actions button{margin-right:1em;padding:.5em 1em}";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head>\
         <body><h1>{title}</h1>{body}<p><a href=\"/\">Home</a></p></body></html>"
    )
}

pub fn home_page() -> String {
    page(
        "netsweep",
        "<div class=\"actions\">\
         <form method=\"get\" action=\"/ping-ip\" style=\"display:inline\"><button>PING IP</button></form>\
         <form method=\"get\" action=\"/ping-port\" style=\"display:inline\"><button>PING PORT</button></form>\
         </div>",
    )
}

pub fn address_form() -> String {
    page(
        "Ping IP",
        "<form method=\"post\" action=\"/ping-ip\">\
         <label>Enter the IP prefix (e.g., 192.168.0): <input name=\"prefix\" required></label>\
         <button>Scan</button></form>",
    )
}

pub fn port_form() -> String {
    page(
        "Ping Port",
        "<p>Enter the IP Address, start port number, and end port number:</p>\
         <form method=\"post\" action=\"/ping-port\">\
         <p><label>IP Address: <input name=\"host\" required></label></p>\
         <p><label>Start port number: <input name=\"start_port\" type=\"number\" min=\"0\" max=\"65535\" required></label></p>\
         <p><label>End port number: <input name=\"end_port\" type=\"number\" min=\"0\" max=\"65535\" required></label></p>\
         <button>Scan</button></form>",
    )
}

/// Items laid out `width` per row. An empty list renders as an empty table.
pub fn table<T: Display + Clone>(items: &[T], width: usize) -> String {
    let mut html = String::from("<table>");
    for row in chunk_rows(items, width) {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(&cell.to_string()));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

pub fn address_results(prefix: &str, result: &ScanResult<String>) -> String {
    let body = format!(
        "<p>Pinged {total} addresses under <code>{prefix}</code> at {when}.</p>\
         <p>Available IP addresses:</p>{up}\
         <p>Unavailable IP addresses:</p>{down}",
        total = result.total(),
        prefix = escape_html(prefix),
        when = Local::now().format("%Y-%m-%d %H:%M:%S"),
        up = table(&result.reachable, ADDRESS_ROW_WIDTH),
        down = table(&result.unreachable, ADDRESS_ROW_WIDTH),
    );
    page("Ping IP results", &body)
}

pub fn port_results(host: &str, result: &ScanResult<PortTarget>) -> String {
    let open: Vec<u16> = result.reachable.iter().map(|t| t.port).collect();
    let closed: Vec<u16> = result.unreachable.iter().map(|t| t.port).collect();

    let body = format!(
        "<p>Scanned {total} ports on <code>{host}</code> at {when}.</p>\
         <p>Available ports:</p>{up}\
         <p>Unavailable ports:</p>{down}",
        total = result.total(),
        host = escape_html(host),
        when = Local::now().format("%Y-%m-%d %H:%M:%S"),
        up = table(&open, PORT_ROW_WIDTH),
        down = table(&closed, PORT_ROW_WIDTH),
    );
    page("Ping Port results", &body)
}

pub fn error_page(message: &str) -> String {
    page(
        "Scan failed",
        &format!("<p class=\"error\">{}</p>", escape_html(message)),
    )
}
