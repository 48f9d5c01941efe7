/// Incremental UTF-8 decoding for byte-chunked output.
///
/// A multi-byte sequence cut by a chunk boundary is carried into the next
/// call; invalid bytes decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.carry.extend_from_slice(bytes);
        let mut text = String::with_capacity(self.carry.len());
        let mut cursor = 0;

        while cursor < self.carry.len() {
            match std::str::from_utf8(&self.carry[cursor..]) {
                Ok(valid) => {
                    text.push_str(valid);
                    cursor = self.carry.len();
                }
                Err(error) => {
                    let valid_end = cursor + error.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.carry[cursor..valid_end]));
                    match error.error_len() {
                        Some(invalid) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            cursor = valid_end + invalid;
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes.
                            cursor = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.carry.drain(..cursor);
        text
    }

    /// Drain bytes still held back, lossily.
    pub fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.carry).into_owned();
        self.carry.clear();
        text
    }

    pub fn has_carry(&self) -> bool {
        !self.carry.is_empty()
    }
}
