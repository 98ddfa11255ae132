//! Serves the trunk-built SPA bundle. Every unknown path falls back to
//! index.html so client-side routes survive a hard refresh.

use actix_files::{Files, NamedFile};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result};
use once_cell::sync::Lazy;
use rustls::{
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
    server::ServerConfig,
};
use rustls_pemfile::{certs, pkcs8_private_keys};
use std::{fs::File, io::BufReader, path::Path};

/* ---------- self-signed dev TLS ------------------------------------------ */
fn build_tls_config() -> ServerConfig {
    let cert_path = Path::new("certs/dev-cert.pem");
    let key_path = Path::new("certs/dev-key.pem");

    let mut reader = BufReader::new(File::open(cert_path).expect("open dev cert"));
    let certs: Vec<CertificateDer<'static>> =
        certs(&mut reader).collect::<Result<_, _>>().expect("parse dev cert");

    let mut reader = BufReader::new(File::open(key_path).expect("open dev key"));
    let key: PrivatePkcs8KeyDer<'static> = pkcs8_private_keys(&mut reader)
        .next()
        .expect("one key")
        .expect("valid pkcs8 key");

    ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, PrivateKeyDer::Pkcs8(key))
        .expect("TLS config")
}
static TLS_CFG: Lazy<ServerConfig> = Lazy::new(build_tls_config);

/* ---------- SPA fallback (index.html) ------------------------------------ */
async fn spa_fallback(req: HttpRequest) -> Result<HttpResponse> {
    Ok(NamedFile::open("../frontend/dist/index.html")?.into_response(&req))
}

/* ---------- main ---------------------------------------------------------- */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Directory produced by `trunk build` in frontend/.
    let dist_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../frontend/dist");
    println!("Serving static files from {}", dist_dir.display());

    HttpServer::new(move || {
        App::new()
            .service(Files::new("/", &dist_dir).index_file("index.html"))
            .default_service(web::to(spa_fallback))
    })
    .bind_rustls_0_23(("0.0.0.0", 8444), TLS_CFG.clone())?
    .run()
    .await
}
