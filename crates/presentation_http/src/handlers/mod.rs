//! HTTP request handlers

pub mod connections;
pub mod departures;
pub mod health;
pub mod locations;
pub mod providers;
pub mod stations;
