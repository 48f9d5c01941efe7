use crate::ipc::{IpcError, MessageSink, WorkerMessage};

/// Hook the payload writes its stdout through, once per write.
///
/// Text may hold several lines, a partial line, or nothing at all.
pub trait OutputHook {
    fn put_stdout(&mut self, text: &str) -> Result<(), IpcError>;
}

/// Turns arbitrarily chunked writes into one `stdout` message per line.
///
/// The unterminated tail of the output is held in `pending` until a later
/// write completes it. A trailing fragment that never sees a newline is
/// never posted.
pub struct LineForwarder<S> {
    sink: S,
    pending: String,
}

impl<S: MessageSink> LineForwarder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pending: String::new(),
        }
    }

    /// Forward every line completed by `text`.
    ///
    /// Each posted line is `pending + text[index..next]`; the pending
    /// buffer is emptied after its first use and whatever follows the last
    /// newline is appended to it.
    pub fn write(&mut self, text: &str) -> Result<(), IpcError> {
        let mut index = 0;
        while let Some(offset) = text[index..].find('\n') {
            let next = index + offset;
            let mut line = std::mem::take(&mut self.pending);
            line.push_str(&text[index..next]);
            self.sink.post(WorkerMessage::Stdout { data: line })?;
            index = next + 1;
        }
        self.pending.push_str(&text[index..]);
        Ok(())
    }

    /// Output written since the last newline.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: MessageSink> OutputHook for LineForwarder<S> {
    fn put_stdout(&mut self, text: &str) -> Result<(), IpcError> {
        self.write(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarder() -> LineForwarder<Vec<WorkerMessage>> {
        LineForwarder::new(Vec::new())
    }

    fn lines(forwarder: &LineForwarder<Vec<WorkerMessage>>) -> Vec<String> {
        forwarder
            .sink()
            .iter()
            .map(|message| match message {
                WorkerMessage::Stdout { data } => data.clone(),
                WorkerMessage::Done => panic!("unexpected done message"),
            })
            .collect()
    }

    #[test]
    fn text_without_newline_is_held_back() {
        let mut fwd = forwarder();
        fwd.write("no newline here").expect("write");

        assert!(fwd.sink().is_empty());
        assert_eq!(fwd.pending(), "no newline here");
    }

    #[test]
    fn empty_write_is_a_no_op() {
        let mut fwd = forwarder();
        fwd.write("partial").expect("write");
        fwd.write("").expect("write");

        assert!(fwd.sink().is_empty());
        assert_eq!(fwd.pending(), "partial");
    }

    #[test]
    fn line_split_across_writes_is_reassembled() {
        let mut fwd = forwarder();
        fwd.write("ab").expect("write");
        fwd.write("cd\n").expect("write");

        assert_eq!(lines(&fwd), vec!["abcd"]);
        assert_eq!(fwd.pending(), "");
    }

    #[test]
    fn trailing_fragment_stays_pending() {
        let mut fwd = forwarder();
        fwd.write("x\ny\nz").expect("write");

        assert_eq!(lines(&fwd), vec!["x", "y"]);
        assert_eq!(fwd.pending(), "z");
    }

    #[test]
    fn pending_prefix_attaches_to_first_line_only() {
        let mut fwd = forwarder();
        fwd.write("pre").expect("write");
        fwd.write("fix\nsecond\n").expect("write");

        assert_eq!(lines(&fwd), vec!["prefix", "second"]);
        assert_eq!(fwd.pending(), "");
    }

    #[test]
    fn consecutive_newlines_produce_empty_lines() {
        let mut fwd = forwarder();
        fwd.write("\n\na\n").expect("write");

        assert_eq!(lines(&fwd), vec!["", "", "a"]);
    }

    #[test]
    fn lines_rejoin_to_the_written_text() {
        let chunks = [
            "Test Long_add (1_000 iter",
            "ations)...\nAvg over 100 runs",
            ": 1.2",
            "\n\nFinished\n",
        ];
        let mut fwd = forwarder();
        for chunk in chunks {
            fwd.write(chunk).expect("write");
        }

        let mut joined = lines(&fwd).join("\n");
        joined.push('\n');
        assert_eq!(joined, chunks.concat());
        assert_eq!(fwd.pending(), "");
    }

    #[test]
    fn multibyte_text_is_sliced_on_char_boundaries() {
        let mut fwd = forwarder();
        fwd.write("±0.5μs/op\n→").expect("write");

        assert_eq!(lines(&fwd), vec!["±0.5μs/op"]);
        assert_eq!(fwd.pending(), "→");
    }

    #[test]
    fn output_hook_forwards_through_write() {
        let mut fwd = forwarder();
        {
            let hook: &mut dyn OutputHook = &mut fwd;
            hook.put_stdout("a\nb").expect("put");
        }

        assert_eq!(lines(&fwd), vec!["a"]);
        assert_eq!(fwd.pending(), "b");
    }
}
