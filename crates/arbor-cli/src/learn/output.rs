//! Fixed one-hot block encoding of predictions for the external scorer.
use std::io::{self, Write};

/// Write the encoded block for one prediction: exactly
/// `number_of_classes + 1` lines, line `i` is `"1"` iff `i == predicted`,
/// else `"0"`.
///
/// The index space is one wider than the class count: the top slot
/// (`i == number_of_classes`) is a reserved placeholder the scorer expects
/// in every block even though no class index ever maps to it. Blocks are
/// concatenated directly, with no delimiter between them.
pub fn write_prediction_block<W: Write>(
    writer: &mut W,
    number_of_classes: usize,
    predicted: usize,
) -> io::Result<()> {
    for i in 0..=number_of_classes {
        writeln!(writer, "{}", if i == predicted { "1" } else { "0" })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(number_of_classes: usize, predicted: usize) -> Vec<String> {
        let mut buffer = Vec::new();
        write_prediction_block(&mut buffer, number_of_classes, predicted).unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn writes_one_more_line_than_the_class_count() {
        for k in 1..6 {
            for c in 0..=k {
                let block = lines(k, c);
                assert_eq!(block.len(), k + 1);
                for (i, line) in block.iter().enumerate() {
                    assert_eq!(line, if i == c { "1" } else { "0" });
                }
            }
        }
    }

    #[test]
    fn three_classes_predicting_one() {
        assert_eq!(lines(3, 1), vec!["0", "1", "0", "0"]);
    }

    #[test]
    fn reserved_top_slot_is_addressable() {
        // No legitimate class maps here, but the encoding must honor it.
        assert_eq!(lines(2, 2), vec!["0", "0", "1"]);
    }

    #[test]
    fn blocks_concatenate_without_a_delimiter() {
        let mut buffer = Vec::new();
        write_prediction_block(&mut buffer, 2, 0).unwrap();
        write_prediction_block(&mut buffer, 2, 2).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1\n0\n0\n0\n0\n1\n");
    }
}
