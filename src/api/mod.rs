//! HTTP API for provisioning A records.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/dns/a-record` (POST)
//!
//!   Expects a JSON request body of the form:
//!
//!   ```json
//!   { "subdomain": "printer", "ip": "192.168.1.40" }
//!   ```
//!
//!  Where `subdomain` is the host label to provision under the configured
//!  [`Config::zone`][`crate::config::Config::zone`]. The `ip` value is optional: when absent,
//!  the record is pointed at the first IPv4 address bound to the host running this service.
//!
//!  The label is normalized (surrounding whitespace and trailing dots trimmed, lowercased)
//!  before use, so `" Printer."` and `printer` name the same record.
//!
//!  For successful upserts, returns HTTP 200 (OK) and a JSON response body of the form:
//!
//!  ```json
//!  { "fqdn": "printer.example.local." }
//!  ```
//!  In the response, `fqdn` is the owner name of the record that now holds the address,
//!  in DNS presentation form. Re-`POST`ing the same pair is a no-op that returns the
//!  same body; a zone that already holds several A records for the owner name yields
//!  HTTP 409 (CONFLICT) and no mutation.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use server::new;
