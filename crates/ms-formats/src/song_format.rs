//! Raw note-code stream decoder.
//!
//! The on-disk song is a flat byte stream of note codes grouped in rows of
//! one code per channel. A terminator code in the first channel slot ends
//! the song; whatever follows it is ignored.

use ms_ir::{NoteEvent, Score, CHANNEL_COUNT, CODE_END};

use crate::FormatError;

/// Decode a note-code stream into a score.
///
/// Unknown codes decode as rests, so a stream from a newer encoder still
/// plays with its unknown voices muted. A terminator outside the first
/// channel slot is not a terminator; it decodes as a silent event and the
/// row plays out.
pub fn load_song(data: &[u8]) -> Result<Score, FormatError> {
    let mut score = Score::default();
    let mut offset = 0;

    loop {
        let Some(&first) = data.get(offset) else {
            return Err(FormatError::MissingTerminator);
        };
        if first == CODE_END {
            break;
        }
        let Some(rest) = data.get(offset + 1..offset + CHANNEL_COUNT) else {
            return Err(FormatError::UnexpectedEof);
        };

        let row = [
            NoteEvent::from_code(first),
            NoteEvent::from_code(rest[0]),
            NoteEvent::from_code(rest[1]),
        ];
        score.push_row(row);
        offset += CHANNEL_COUNT;
    }

    log::debug!("decoded {} rows from {} bytes", score.len(), data.len());
    Ok(score)
}
