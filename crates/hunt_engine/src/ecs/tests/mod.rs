//! Integration tests driving whole frames through the scene manager

mod round_integration;
