pub mod csrf_token;
