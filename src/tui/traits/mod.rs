//! Component trait system for the panel compositor
//!
//! This module defines the contracts that UI components implement. The
//! layout manager and focus coordinator only ever talk to components through
//! these traits, so any element (messages list, input line, status segment,
//! confirmation dialog) can be slotted into any panel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  App (composition root)                     │
//! │      FocusCoordinator ─── LayoutManager ─── Screen          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │  Panel   │   │  Panel   │   │  Panel   │
//!        │ messages │   │  input   │   │  status  │──┬─ status-left
//!        └──────────┘   └──────────┘   └──────────┘  ├─ status-center
//!              │               │               │     └─ status-right
//!              └───────────────┴───────────────┘
//!                              │
//!                     Implements traits:
//!             Component (+ Visibility, Renderable),
//!                       Scrollable
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - identity, properties, bindings, focus hooks
//! - [`Visibility`] - optional: component-level show/hide
//! - [`Renderable`] - optional: paints content into its surface
//! - [`Scrollable`] - components with scrollable content

mod component;
mod interactive;
mod scrollable;

pub use component::{component_ref, Component, ComponentRef, Renderable, Visibility};
pub use interactive::{Handled, ScrollKeys};
pub use scrollable::Scrollable;
