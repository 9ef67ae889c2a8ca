//! In-process stand-in for the prediction service, used by tests.

use std::net::SocketAddr;
use std::sync::mpsc;

use axum::Router;

/// Serve `app` on an ephemeral port from a helper thread and return its base URL.
pub(crate) fn serve(app: Router) -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind mock server");
            tx.send(listener.local_addr().expect("mock addr"))
                .expect("report mock addr");
            let _ = axum::serve(listener, app).await;
        });
    });

    let addr = rx.recv().expect("mock server address");
    format!("http://{addr}")
}
