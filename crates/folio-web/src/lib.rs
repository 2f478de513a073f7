#![forbid(unsafe_code)]

//! WASM frontend for the folio portfolio page.
//!
//! This crate binds the host-agnostic controllers from `folio-core` to the
//! browser DOM and exports `FolioApp` through `wasm-bindgen`:
//!
//! ```js
//! import init, { FolioApp } from "./pkg/folio_web.js";
//! await init();
//! const app = new FolioApp(null, "folio_core=debug");
//! ```
//!
//! Every module is compiled only on `wasm32` targets; native builds of this
//! crate are empty.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioApp;
