use ivr_upload::{resolve_reference, UploadConfig, UploadResult, UploadTarget, Uploader};
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;
use url::Url;

/// Uploads a file to an IVR extension folder
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "ivr-upload")]
struct Opts {
    /// media host api root
    #[structopt(short, long, default_value = "https://www.call2all.co.il/ym/")]
    base_url: Url,

    /// api token
    #[structopt(short, long)]
    token: String,

    /// destination path, e.g. ivr/1
    #[structopt(short, long)]
    destination: String,

    /// name reported to the host instead of the local file name
    #[structopt(short, long)]
    name: Option<String>,

    /// files larger than this are uploaded in parts
    #[structopt(short, long, default_value = "20000000")]
    chunk_size: u64,

    /// request timeout in seconds
    #[structopt(long, default_value = "20")]
    timeout: u64,

    /// print the reply as received instead of the playback reference
    #[structopt(long)]
    raw: bool,

    /// file to upload
    #[structopt(short, long, parse(from_os_str))]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> UploadResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Opts {
        base_url,
        token,
        destination,
        name,
        chunk_size,
        timeout,
        raw,
        file,
    } = Opts::from_args();

    let config = UploadConfig::default()
        .with_base_url(base_url.as_str())
        .with_chunk_size(chunk_size)
        .with_timeout(Duration::from_secs(timeout));

    let mut target = UploadTarget::new(token, destination);
    if let Some(name) = name {
        target = target.with_display_name(name);
    }

    let reply = Uploader::new(&config)?.upload(&target, &file).await?;

    if raw {
        println!("{}", reply);
    } else {
        println!(
            "File {} uploaded. (reference: {})",
            file.display(),
            resolve_reference(&reply)?
        );
    }

    Ok(())
}
