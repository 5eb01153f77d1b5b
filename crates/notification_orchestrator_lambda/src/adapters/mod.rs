pub mod aws;
pub mod dynamo;
pub mod sqs;
