pub mod inference_provider;
