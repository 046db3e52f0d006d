//! JSON protocol server implementation
//!
//! Line-delimited JSON over TCP. Every request line holds one command object
//! and yields exactly one response line.

use std::net::SocketAddr;

use futures::prelude::*;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use crate::{
    color::{BaseColor, Hsl},
    screensaver::{ScreensaverHandle, ScreensaverHandleError},
};

/// Schema definitions as Serde serializable structures and enums
mod message;
use message::{JsonRequest, JsonResponse};

/// JSON protocol codec definition
mod codec;
use codec::*;

use super::common;

#[derive(Debug, Error)]
pub enum JsonServerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] JsonCodecError),
    #[error("controller error: {0}")]
    Controller(#[from] ScreensaverHandleError),
}

async fn handle_request(
    request: JsonRequest,
    screensaver: &ScreensaverHandle,
) -> Result<JsonResponse, JsonServerError> {
    Ok(match request {
        JsonRequest::State => JsonResponse::state(screensaver.state().await?),

        JsonRequest::History => JsonResponse::history(screensaver.history().await?),

        JsonRequest::TogglePlay => JsonResponse::playing(screensaver.toggle_play().await?),

        JsonRequest::Select { index } => {
            let history = screensaver.history().await?;

            match history.get(index) {
                Some(sample) => {
                    // Reply with the same enriched sample the controller publishes
                    let sample = sample.clone().with_hsl();
                    screensaver.select_color(sample.clone()).await?;
                    JsonResponse::color(sample)
                }
                None => JsonResponse::error(&format!("no history entry at index {}", index)),
            }
        }

        JsonRequest::CustomColor { hex } => match screensaver.apply_custom_color(hex).await? {
            Ok(sample) => JsonResponse::color(sample),
            Err(error) => JsonResponse::error(&error),
        },

        JsonRequest::ExportCsv => JsonResponse::csv(screensaver.export_csv().await?),

        JsonRequest::Psychology => match screensaver.state().await?.current {
            Some(sample) => {
                let sample = sample.with_hsl();

                match &sample.hsl {
                    Some(hsl) => {
                        let base = BaseColor::classify(Hsl {
                            h: hsl.h,
                            s: hsl.s,
                            l: hsl.l,
                        });

                        JsonResponse::psychology(base, base.psychology())
                    }
                    None => JsonResponse::error(&"current color has no HSL data"),
                }
            }
            None => JsonResponse::error(&"no current color"),
        },
    })
}

pub async fn handle_client(
    (socket, peer_addr): (TcpStream, SocketAddr),
    screensaver: ScreensaverHandle,
) -> Result<(), JsonServerError> {
    debug!("accepted new connection from {}", peer_addr);

    let framed = Framed::new(socket, JsonCodec::default());
    let (mut writer, mut reader) = framed.split();

    while let Some(request) = reader.next().await {
        trace!("processing request: {:?}", request);

        let reply = match request {
            Ok(request) => handle_request(request, &screensaver).await?,
            Err(JsonCodecError::Io(error)) if common::is_disconnect(&error) => break,
            Err(error) => JsonResponse::error(&error),
        };

        trace!("sending response: {:?}", reply);

        match writer.send(reply).await {
            Err(JsonCodecError::Io(error)) if common::is_disconnect(&error) => break,
            other => other?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        lookup::{ColorLookup, LookupError},
        models::{Color, ColorSample, Config},
        screensaver::Screensaver,
    };

    use super::*;

    /// Lookup that is always unreachable, so samples are synthesized locally
    struct OfflineLookup;

    #[async_trait]
    impl ColorLookup for OfflineLookup {
        async fn by_rgb(&self, _color: Color) -> Result<ColorSample, LookupError> {
            Err(LookupError::Status(503))
        }

        async fn by_hex(&self, _hex: &str) -> Result<ColorSample, LookupError> {
            Err(LookupError::Status(503))
        }
    }

    #[tokio::test]
    async fn select_responds_with_enriched_sample() {
        let (screensaver, handle) = Screensaver::new(&Config::default(), Arc::new(OfflineLookup));
        let join = tokio::spawn(screensaver.run());

        // Seed the history
        handle
            .apply_custom_color("#336699".to_owned())
            .await
            .unwrap()
            .unwrap();

        let response = handle_request(JsonRequest::Select { index: 0 }, &handle)
            .await
            .unwrap();

        match response {
            JsonResponse::Color { success, color } => {
                assert!(success);
                assert_eq!(color.hex.clean, "336699");
                assert!(color.hsl.is_some());

                // The wire sample matches the published state
                let current = handle.state().await.unwrap().current.unwrap();
                assert_eq!(current, color);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        handle.stop().await.unwrap();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn select_out_of_range_is_an_error() {
        let (screensaver, handle) = Screensaver::new(&Config::default(), Arc::new(OfflineLookup));
        let join = tokio::spawn(screensaver.run());

        let response = handle_request(JsonRequest::Select { index: 42 }, &handle)
            .await
            .unwrap();

        assert!(matches!(response, JsonResponse::Error { .. }));

        handle.stop().await.unwrap();
        join.await.unwrap();
    }
}
