use bytes::BytesMut;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use super::message;

#[derive(Debug, Error)]
pub enum JsonCodecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("line codec error: {0}")]
    Lines(#[from] LinesCodecError),
}

/// JSON tokio codec
///
/// One request or response per line.
#[derive(Default)]
pub struct JsonCodec {
    lines: LinesCodec,
}

impl Decoder for JsonCodec {
    type Item = message::JsonRequest;
    type Error = JsonCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.lines.decode(src)? {
            Some(ref line) => Ok(Some(serde_json::from_str(line)?)),
            None => Ok(None),
        }
    }
}

impl Encoder<message::JsonResponse> for JsonCodec {
    type Error = JsonCodecError;

    fn encode(
        &mut self,
        item: message::JsonResponse,
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        let encoded = serde_json::to_string(&item)?;
        self.lines.encode(encoded, dst).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::message::{JsonRequest, JsonResponse};
    use super::*;

    fn decode_line(line: &str) -> Result<Option<JsonRequest>, JsonCodecError> {
        let mut codec = JsonCodec::default();
        let mut buffer = BytesMut::from(format!("{}\n", line).as_str());
        codec.decode(&mut buffer)
    }

    #[test]
    fn decodes_commands() {
        assert!(matches!(
            decode_line(r#"{"command":"state"}"#),
            Ok(Some(JsonRequest::State))
        ));
        assert!(matches!(
            decode_line(r#"{"command":"togglePlay"}"#),
            Ok(Some(JsonRequest::TogglePlay))
        ));
        assert!(matches!(
            decode_line(r#"{"command":"select","index":2}"#),
            Ok(Some(JsonRequest::Select { index: 2 }))
        ));

        match decode_line(r##"{"command":"customColor","hex":"#FF8800"}"##) {
            Ok(Some(JsonRequest::CustomColor { hex })) => assert_eq!(hex, "#FF8800"),
            other => panic!("unexpected decode result: {:?}", other),
        }
    }

    #[test]
    fn incomplete_line_yields_nothing() {
        let mut codec = JsonCodec::default();
        let mut buffer = BytesMut::from(r#"{"command":"sta"#);

        assert!(matches!(codec.decode(&mut buffer), Ok(None)));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            decode_line("not json"),
            Err(JsonCodecError::Decode(_))
        ));
        assert!(matches!(
            decode_line(r#"{"command":"warp"}"#),
            Err(JsonCodecError::Decode(_))
        ));
    }

    #[test]
    fn encodes_line_terminated_json() {
        let mut codec = JsonCodec::default();
        let mut buffer = BytesMut::new();

        codec
            .encode(JsonResponse::playing(true), &mut buffer)
            .unwrap();

        let encoded = String::from_utf8(buffer.to_vec()).unwrap();
        assert!(encoded.ends_with('\n'));
        assert_eq!(
            encoded.trim_end(),
            r#"{"success":true,"playing":true}"#
        );
    }
}
