// handlers/mod.rs - two tiers
//
// Public (no session): site pages, contact form, admin login/logout
// Protected (session guard): admin dashboard and /admin/api/*
pub mod protected;
pub mod public;
