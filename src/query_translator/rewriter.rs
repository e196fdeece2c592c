//! Applies recorded rewrite instructions to the original query text.

use std::collections::BTreeMap;

use super::frame_resolver::RewriteInstruction;

/// Splice every instruction into the query, highest offset first.
///
/// Replacement lengths differ from the spans they replace, shifting all text
/// behind them; working from the end of the string backward keeps every
/// not-yet-applied offset valid. An empty map returns the input unchanged.
pub(crate) fn apply_rewrites(
    query: &str,
    rewrites: &BTreeMap<usize, RewriteInstruction>,
) -> String {
    if rewrites.is_empty() {
        return query.to_string();
    }

    let mut rewritten = query.to_string();
    for (&offset, instruction) in rewrites.iter().rev() {
        rewritten.replace_range(offset..offset + instruction.len, &instruction.replacement);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(len: usize, replacement: &str) -> RewriteInstruction {
        RewriteInstruction {
            len,
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_empty_map_is_identity() {
        let query = "MATCH (a)-[:REL]->(b) RETURN a";
        assert_eq!(apply_rewrites(query, &BTreeMap::new()), query);
    }

    #[test]
    fn test_single_rewrite() {
        let query = "MATCH (:Node1)-[:REL]->(b:Node2) RETURN b";
        let rewrites = BTreeMap::from([(17, instruction(3, "Node1_REL_Node2"))]);
        assert_eq!(
            apply_rewrites(query, &rewrites),
            "MATCH (:Node1)-[:Node1_REL_Node2]->(b:Node2) RETURN b"
        );
    }

    #[test]
    fn test_multiple_rewrites_with_growth() {
        // Two edits whose replacements are longer than the originals; the
        // earlier offset must be unaffected by the later edit.
        let query = "ab XX cd YY ef";
        let rewrites = BTreeMap::from([
            (3, instruction(2, "LONGER")),
            (9, instruction(2, "EVENLONGER")),
        ]);
        assert_eq!(apply_rewrites(query, &rewrites), "ab LONGER cd EVENLONGER ef");
    }

    #[test]
    fn test_forward_application_oracle() {
        // Applying in ascending order with explicit offset bookkeeping must
        // agree with the descending-order implementation.
        let query = "one TWO three FOUR five SIX end";
        let rewrites = BTreeMap::from([
            (4, instruction(3, "2")),
            (14, instruction(4, "quattro")),
            (24, instruction(3, "6!")),
        ]);

        let backward = apply_rewrites(query, &rewrites);

        let mut forward = query.to_string();
        let mut shift: isize = 0;
        for (&offset, instr) in rewrites.iter() {
            let at = (offset as isize + shift) as usize;
            forward.replace_range(at..at + instr.len, &instr.replacement);
            shift += instr.replacement.len() as isize - instr.len as isize;
        }

        assert_eq!(backward, forward);
        assert_eq!(backward, "one 2 three quattro five 6! end");
    }
}
