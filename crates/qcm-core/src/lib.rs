//! Core types and rules for the QCM quiz backend.
//!
//! This crate holds the subject/question/user model, the [`store::QuizStore`]
//! persistence abstraction, and the operations layered over it: subject
//! creation, question submission, quiz draws and credential checks. It is
//! free of HTTP and database dependencies.

#![allow(async_fn_in_trait)]

pub mod auth;
pub mod error;
pub mod matiere;
pub mod question;
pub mod quiz;
pub mod store;
pub mod user;

pub use error::{Error, Result};
