use anyhow::Result;
use http::Method;
use reqwest::blocking::Client;
use std::time::Duration;
use uploadcare_core::{Client as UploadcareClient, Config, Context, FilePart, OsEnv};
use uploadcare_http_send_reqwest::ReqwestHttpSend;

fn main() -> Result<()> {
    env_logger::init();

    // Uploadcare does no timeout handling itself, set it on the transport.
    // Both the verifying and the non-verifying client are built from this.
    let http_send = ReqwestHttpSend::from_builder(|| {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
    })?;

    let ctx = Context::new().with_http_send(http_send).with_env(OsEnv);

    // Reads UPLOADCARE_PUBLIC_KEY, UPLOADCARE_SECRET_KEY and friends.
    let config = Config::default().from_env(&ctx)?;
    let uploadcare = UploadcareClient::new(ctx, config);

    let file = FilePart::new("file", "Hello from uploadcare-rs!")
        .with_file_name("hello.txt")
        .with_content_type("text/plain");
    let uploaded = uploadcare.upload_request(Method::POST, "base/", None, Some(std::slice::from_ref(&file)))?;
    println!("uploaded: {uploaded}");

    match uploadcare.rest_request(Method::GET, "files/?limit=1", None) {
        Ok(Some(files)) => println!("files: {files}"),
        Ok(None) => println!("no content"),
        Err(e) => eprintln!("request failed: {e}"),
    }

    Ok(())
}
