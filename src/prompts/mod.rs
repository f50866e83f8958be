pub mod review_prompt;
