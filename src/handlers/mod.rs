// handlers/mod.rs - HTTP handler modules
//
// One module per API area, one file per route.
pub mod admin; // Administrative operations (/api/admin/*)
