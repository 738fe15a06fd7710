pub mod generation_response;
