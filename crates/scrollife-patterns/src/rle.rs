// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Run Length Encoded (RLE) pattern parsing.

```text
#N Glider
x = 3, y = 3, rule = B3/S23
bo$2bo$3o!
```

- `#` lines are comments.
- The extent line is optional; only its rule is checked.
- Body tags: `b` dead, `o` alive, `$` end of row, `!` end of pattern. Each
  may be preceded by a run count. Line breaks inside the body are ignored,
  as is other whitespace.
- Only blank lines and comments may follow `!`.
*/

use scrollife_structures::GridVector2;
use tracing::trace;

use crate::error::{PatternError, Result};

/// The only rule the engine evaluates.
pub const SUPPORTED_RULE: &str = "B3/S23";

/// Live cells of an RLE pattern, in the order they are encoded.
///
/// The first encoded cell of the first row is `(0, 0)`; `y` grows downwards.
pub fn parse_rle(text: &str) -> Result<Vec<GridVector2>> {
    let mut parser = RleParser::default();
    for (index, raw_line) in text.lines().enumerate() {
        parser.line(index + 1, raw_line.trim_end_matches('\r'))?;
    }
    trace!("Parsed RLE pattern with {} live cells", parser.cells.len());
    Ok(parser.cells)
}

fn rle_error(line: usize, column: usize, message: impl Into<String>) -> PatternError {
    PatternError::Rle {
        line,
        column,
        message: message.into(),
    }
}

#[derive(Default)]
struct RleParser {
    cells: Vec<GridVector2>,
    x: i32,
    y: i32,
    completed: bool,
    seen_body: bool,
    /// Run count read but not yet applied: (column, value) on the current line.
    pending_count: Option<(usize, i32)>,
}

impl RleParser {
    fn line(&mut self, line: usize, text: &str) -> Result<()> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        if self.completed {
            let column = text.len() - trimmed.len() + 1;
            return Err(rle_error(line, column, "content after '!'"));
        }
        if !self.seen_body && trimmed.starts_with('x') {
            return check_extent(line, trimmed);
        }
        self.seen_body = true;
        self.body(line, text)
    }

    fn body(&mut self, line: usize, text: &str) -> Result<()> {
        for (offset, c) in text.char_indices() {
            let column = offset + 1;
            if self.completed {
                if c.is_whitespace() {
                    continue;
                }
                let message = if c == '!' {
                    "pattern contains multiple '!'"
                } else {
                    "content after '!'"
                };
                return Err(rle_error(line, column, message));
            }

            if let Some(digit) = c.to_digit(10) {
                let (start, count) = self.pending_count.unwrap_or((column, 0));
                let count = count
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as i32))
                    .ok_or_else(|| rle_error(line, start, "run count overflows"))?;
                self.pending_count = Some((start, count));
                continue;
            }
            if c.is_whitespace() {
                continue;
            }

            let run = match self.pending_count.take() {
                Some((start, 0)) => {
                    return Err(rle_error(line, start, "run count must be positive"));
                }
                Some((_, count)) => count,
                None => 1,
            };
            match c {
                'b' => self.x = self.advance(self.x, run, line, column)?,
                'o' => {
                    let end = self.advance(self.x, run, line, column)?;
                    let y = self.y;
                    self.cells.extend((self.x..end).map(|x| GridVector2::new(x, y)));
                    self.x = end;
                }
                '$' => {
                    self.y = self.advance(self.y, run, line, column)?;
                    self.x = 0;
                }
                '!' => self.completed = true,
                other => {
                    return Err(rle_error(
                        line,
                        column,
                        format!("unexpected character {other:?}"),
                    ));
                }
            }
        }

        // A count and its tag must share a line.
        if let Some((start, _)) = self.pending_count {
            return Err(rle_error(line, start, "run count without a tag"));
        }
        Ok(())
    }

    fn advance(&self, from: i32, run: i32, line: usize, column: usize) -> Result<i32> {
        from.checked_add(run)
            .ok_or_else(|| rle_error(line, column, "pattern exceeds the grid"))
    }
}

/// Validates `x = <w>, y = <h>[, rule = <rule>]`.
fn check_extent(line: usize, text: &str) -> Result<()> {
    let mut seen_x = false;
    let mut seen_y = false;
    for field in text.split(',') {
        let column = field.as_ptr() as usize - text.as_ptr() as usize + 1;
        let Some((key, value)) = field.split_once('=') else {
            return Err(rle_error(line, column, format!("malformed extent field {field:?}")));
        };
        let value = value.trim();
        match key.trim() {
            "x" | "y" => {
                if value.parse::<u32>().is_err() {
                    return Err(rle_error(line, column, format!("invalid extent {value:?}")));
                }
                if key.trim() == "x" {
                    seen_x = true;
                } else {
                    seen_y = true;
                }
            }
            "rule" => {
                if !value.eq_ignore_ascii_case(SUPPORTED_RULE) {
                    return Err(rle_error(
                        line,
                        column,
                        format!("unsupported rule {value:?}, only {SUPPORTED_RULE} is evaluated"),
                    ));
                }
            }
            other => {
                return Err(rle_error(line, column, format!("unknown extent field {other:?}")));
            }
        }
    }
    if !(seen_x && seen_y) {
        return Err(rle_error(line, 1, "extent line needs both x and y"));
    }
    Ok(())
}
