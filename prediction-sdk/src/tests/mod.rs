//! Unit tests for the Prediction SDK
//!
//! This module contains tests for various components of the SDK.
