use std::collections::HashSet;

/// One input element of [`expand_seq`]: a frame number that is already
/// numeric, or a range expression such as `1-4`, `6-10x2` or `8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqToken {
    Num(i64),
    Expr(String),
}

impl From<i64> for SeqToken {
    fn from(n: i64) -> Self {
        SeqToken::Num(n)
    }
}

impl From<&str> for SeqToken {
    fn from(s: &str) -> Self {
        SeqToken::Expr(s.to_owned())
    }
}

/// Expands a mixed list of frame numbers and range expressions into the
/// frame numbers they denote. `1-4` counts up, `5-1` counts down and
/// `1-10x2` walks upward in strides of two. The sign of a stride is
/// ignored, the direction of travel comes from comparing the range ends.
///
/// Numbers keep the order of their first appearance and later duplicates
/// are dropped, so `["0-16x8", "0-16x2"]` expands to
/// `[0, 8, 16, 2, 4, 6, 10, 12, 14]`. A malformed expression is discarded
/// in its entirety without any diagnostic.
pub fn expand_seq(tokens: &[SeqToken]) -> Vec<i64> {
    let mut exp = Expansion::default();
    for token in tokens {
        match token {
            SeqToken::Num(n) => exp.push(*n),
            SeqToken::Expr(s) => expand_token(s, &mut exp),
        }
    }
    exp.frames
}

/// [`expand_seq`] for callers that only hold strings.
pub fn expand_seq_strs<S: AsRef<str>>(tokens: &[S]) -> Vec<i64> {
    let mut exp = Expansion::default();
    for token in tokens {
        expand_token(token.as_ref(), &mut exp);
    }
    exp.frames
}

#[derive(Default)]
struct Expansion {
    frames: Vec<i64>,
    seen: HashSet<i64>,
}

impl Expansion {
    fn push(&mut self, frame: i64) {
        if self.seen.insert(frame) {
            self.frames.push(frame);
        }
    }
}

fn expand_token(raw: &str, exp: &mut Expansion) {
    // Internal whitespace is noise, and the sign of an explicit stride is
    // always discarded.
    let cleaned = raw.replace(' ', "").replace('\t', "").replace("x-", "x");

    let (range_part, step) = match split_once(&cleaned, 'x') {
        Some((range, step_str)) => {
            let step = match parse_digits(step_str) {
                Some(s) if s > 0 => s,
                _ => return,
            };
            (range, step)
        }
        None => (cleaned.as_str(), 1),
    };

    let mut parts: Vec<&str> = range_part.split('-').collect();

    // A leading empty part means the start value had a leading minus sign.
    // More than one leading minus leaves an empty part behind that fails
    // the digit check below.
    let start = match read_component(&mut parts, 0) {
        Some(n) => n,
        None => return,
    };

    if parts.len() == 1 {
        exp.push(start);
        return;
    }

    let end = match read_component(&mut parts, 1) {
        Some(n) => n,
        None => return,
    };

    if parts.len() != 2 {
        return;
    }

    if start == end {
        exp.push(start);
    } else if start < end {
        let mut frame = start;
        while frame <= end {
            exp.push(frame);
            frame = match frame.checked_add(step) {
                Some(f) => f,
                None => break,
            };
        }
    } else {
        let mut frame = start;
        while frame >= end {
            exp.push(frame);
            frame = match frame.checked_sub(step) {
                Some(f) => f,
                None => break,
            };
        }
    }
}

// Reads the numeric component at `at`, consuming one empty part first when
// the component was written with a leading minus sign.
fn read_component(parts: &mut Vec<&str>, at: usize) -> Option<i64> {
    if parts[at].is_empty() {
        parts.remove(at);
        if parts.len() <= at {
            return None;
        }
        parse_digits(parts[at]).map(|n| -n)
    } else {
        parse_digits(parts[at])
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn split_once(s: &str, sep: char) -> Option<(&str, &str)> {
    let at = s.find(sep)?;
    Some((&s[..at], &s[at + sep.len_utf8()..]))
}

/// Condenses a list of frame numbers (unordered, duplicates tolerated)
/// into the shortest notation the greedy pass finds: bare numbers,
/// `first-last` ranges and `first-lastxstep` stride ranges, all zero
/// padded to `pad` digits. Re-expanding the result reproduces the sorted,
/// deduplicated input.
pub fn condense_seq(frames: &[i64], pad: usize) -> Vec<String> {
    let mut sorted = frames.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return Vec::new();
    }
    if sorted.len() == 1 {
        return vec![format!("{:0w$}", sorted[0], w = pad)];
    }

    let mut runs = build_runs(&sorted);
    resolve_runs(&mut runs);
    refine_runs(&mut runs);
    format_runs(&runs, &sorted, pad)
}

// A span of the sorted frame list sharing one gap value. `len` counts the
// frames the run owns, the frame after the last owned one belongs to the
// following run. Runs are only ever grown or shrunk at their boundary, the
// arena order never changes.
struct Run {
    len: usize,
    start: usize,
    gap: i64,
    resolved: bool,
}

fn build_runs(sorted: &[i64]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for i in 1..sorted.len() {
        let gap = sorted[i] - sorted[i - 1];
        match runs.last_mut() {
            Some(run) if run.gap == gap => run.len += 1,
            _ => runs.push(Run {
                len: 1,
                start: i - 1,
                gap,
                resolved: false,
            }),
        }
    }
    // Sentinel owning the final frame. Selecting it ends the greedy pass.
    runs.push(Run {
        len: 1,
        start: sorted.len() - 1,
        gap: 0,
        resolved: false,
    });
    runs
}

// Selection order: longest run first, then smallest gap, then highest
// start index. The zero-gap sentinel compares after every real run so it
// is only picked once everything else is resolved.
fn run_key(run: &Run) -> (bool, i64, i64, i64) {
    (
        run.gap == 0,
        -(run.len as i64),
        run.gap,
        -(run.start as i64),
    )
}

fn resolve_runs(runs: &mut [Run]) {
    loop {
        let mut best: Option<usize> = None;
        for i in 0..runs.len() {
            if runs[i].resolved {
                continue;
            }
            match best {
                Some(b) if run_key(&runs[i]) >= run_key(&runs[b]) => {}
                _ => best = Some(i),
            }
        }
        let i = match best {
            Some(i) => i,
            None => return,
        };
        runs[i].resolved = true;
        if runs[i].gap == 0 {
            return;
        }
        // A lone frame with a wide gap must not steal its neighbour into a
        // two-frame range that would imply a stride.
        if runs[i].len == 1 && runs[i].gap > 1 {
            continue;
        }
        if i + 1 < runs.len() && !runs[i + 1].resolved {
            transfer(runs, i);
        }
    }
}

// One more scan over adjacent pairs. A tighter run one frame short of its
// wider neighbour claims the boundary frame.
fn refine_runs(runs: &mut [Run]) {
    for i in 0..runs.len() - 1 {
        let a = &runs[i];
        let b = &runs[i + 1];
        if a.len == 1 && a.gap > 1 {
            continue;
        }
        if a.gap < b.gap && a.len + 1 == b.len {
            transfer(runs, i);
        }
    }
}

fn transfer(runs: &mut [Run], i: usize) {
    runs[i].len += 1;
    runs[i + 1].len -= 1;
    runs[i + 1].start += 1;
}

fn format_runs(runs: &[Run], sorted: &[i64], pad: usize) -> Vec<String> {
    let mut result = Vec::new();
    for run in runs {
        if run.len == 0 {
            continue;
        }
        let first = sorted[run.start];
        let last = sorted[run.start + run.len - 1];
        if run.len == 1 {
            result.push(format!("{:0w$}", first, w = pad));
        } else if run.len == 2 && run.gap > 1 {
            // Two frames with a wide gap read as two singles, never as a
            // range over only two points.
            result.push(format!("{:0w$}", first, w = pad));
            result.push(format!("{:0w$}", last, w = pad));
        } else if run.gap > 1 {
            result.push(format!(
                "{:0w$}-{:0w$}x{}",
                first,
                last,
                run.gap,
                w = pad
            ));
        } else {
            result.push(format!("{:0w$}-{:0w$}", first, last, w = pad));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: &[&str]) -> Vec<i64> {
        expand_seq_strs(tokens)
    }

    #[test]
    fn expands_single_numbers_and_strings() {
        let tokens = [
            SeqToken::from(1),
            SeqToken::from("004"),
            SeqToken::from(10),
            SeqToken::from(15),
        ];
        assert_eq!(expand_seq(&tokens), vec![1, 4, 10, 15]);
    }

    #[test]
    fn expands_plain_ranges() {
        assert_eq!(expand(&["1-4", "10-15"]), vec![1, 2, 3, 4, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn expands_stride_ranges() {
        assert_eq!(expand(&["1-10x2", "20-60x10"]), vec![1, 3, 5, 7, 9, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn expands_reverse_ranges() {
        assert_eq!(expand(&["5-1"]), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn keeps_first_seen_order_and_drops_duplicates() {
        assert_eq!(expand(&["0-16x8", "0-16x2"]), vec![0, 8, 16, 2, 4, 6, 10, 12, 14]);
    }

    #[test]
    fn duplicates_across_tokens_are_dropped() {
        assert_eq!(expand(&["1-3", "2-5"]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn expands_negative_ranges() {
        assert_eq!(expand(&["-20--17"]), vec![-20, -19, -18, -17]);
        assert_eq!(expand(&["5--2"]), vec![5, 4, 3, 2, 1, 0, -1, -2]);
        assert_eq!(expand(&["-5"]), vec![-5]);
    }

    #[test]
    fn stride_sign_is_ignored() {
        assert_eq!(expand(&["10--10x2"]), expand(&["10--10x-2"]));
        assert_eq!(
            expand(&["10--10x2"]),
            vec![10, 8, 6, 4, 2, 0, -2, -4, -6, -8, -10]
        );
    }

    #[test]
    fn internal_whitespace_is_stripped() {
        assert_eq!(expand(&["1 - 4"]), vec![1, 2, 3, 4]);
        assert_eq!(expand(&["1\t-\t4 x 1"]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn degenerate_range_yields_one_number() {
        assert_eq!(expand(&["7-7"]), vec![7]);
    }

    #[test]
    fn malformed_tokens_are_discarded() {
        assert_eq!(expand(&["1-6-12"]), Vec::<i64>::new());
        assert_eq!(expand(&["a-b"]), Vec::<i64>::new());
        assert_eq!(expand(&["1-6xa"]), Vec::<i64>::new());
        assert_eq!(expand(&["1-6x2-"]), Vec::<i64>::new());
        assert_eq!(expand(&["1---6"]), Vec::<i64>::new());
        assert_eq!(expand(&["--5"]), Vec::<i64>::new());
        assert_eq!(expand(&["10--10x--2"]), Vec::<i64>::new());
        assert_eq!(expand(&[""]), Vec::<i64>::new());
        assert_eq!(expand(&["x2"]), Vec::<i64>::new());
        assert_eq!(expand(&["3x"]), Vec::<i64>::new());
    }

    #[test]
    fn zero_stride_is_discarded() {
        assert_eq!(expand(&["1-5x0"]), Vec::<i64>::new());
    }

    #[test]
    fn bad_tokens_do_not_poison_good_ones() {
        assert_eq!(expand(&["1-5", "8-a"]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn expansion_is_idempotent() {
        let once = expand(&["0-16x8", "0-16x2", "40-30x3"]);
        let tokens: Vec<SeqToken> = once.iter().map(|&n| SeqToken::from(n)).collect();
        assert_eq!(expand_seq(&tokens), once);
    }

    #[test]
    fn condenses_nothing_to_nothing() {
        assert_eq!(condense_seq(&[], 1), Vec::<String>::new());
    }

    #[test]
    fn condenses_a_single_frame_with_padding() {
        assert_eq!(condense_seq(&[5], 3), vec!["005"]);
        assert_eq!(condense_seq(&[5], 1), vec!["5"]);
        assert_eq!(condense_seq(&[-5], 3), vec!["-05"]);
    }

    #[test]
    fn condenses_consecutive_frames_to_one_range() {
        assert_eq!(condense_seq(&[1, 2], 1), vec!["1-2"]);
        assert_eq!(condense_seq(&[2, 1, 3, 7, 8, 4, 5, 6], 1), vec!["1-8"]);
    }

    #[test]
    fn condenses_mixed_gaps() {
        assert_eq!(
            condense_seq(&[1, 2, 3, 4, 6, 8, 10], 1),
            vec!["1-4", "6-10x2"]
        );
    }

    #[test]
    fn lone_trailing_frames_stay_single() {
        assert_eq!(condense_seq(&[1, 2, 3, 4, 6, 8], 1), vec!["1-4", "6", "8"]);
    }

    #[test]
    fn two_frames_with_a_wide_gap_stay_single() {
        assert_eq!(condense_seq(&[1, 5], 1), vec!["1", "5"]);
    }

    #[test]
    fn condenses_pure_stride_runs() {
        assert_eq!(condense_seq(&[1, 3, 5, 7], 1), vec!["1-7x2"]);
        assert_eq!(condense_seq(&[1, 3, 5, 7, 8], 1), vec!["1-7x2", "8"]);
    }

    #[test]
    fn boundary_frame_prefers_the_tighter_run() {
        assert_eq!(
            condense_seq(&[1, 2, 3, 5, 7, 9, 10, 11, 12, 13], 1),
            vec!["1-3", "5", "7", "9-13"]
        );
        assert_eq!(
            condense_seq(&[1, 2, 4, 6, 7, 8], 1),
            vec!["1-2", "4", "6-8"]
        );
    }

    #[test]
    fn duplicates_collapse_before_condensing() {
        assert_eq!(condense_seq(&[3, 1, 1, 2, 3, 3], 1), vec!["1-3"]);
        assert_eq!(condense_seq(&[7, 7, 7], 2), vec!["07"]);
    }

    #[test]
    fn padding_is_sign_aware() {
        assert_eq!(condense_seq(&[-2, -1, 0, 1], 3), vec!["-02-001"]);
        assert_eq!(condense_seq(&[8, 10], 4), vec!["0008", "0010"]);
    }

    #[test]
    fn condensed_output_re_expands_to_the_sorted_input() {
        let cases: &[&[i64]] = &[
            &[1, 2, 3, 4, 6, 8, 10],
            &[1, 2, 3, 4, 6, 8],
            &[0, 8, 16, 2, 4, 6, 10, 12, 14],
            &[5, 4, 3, 2, 1],
            &[-11, -4, 0, 1, 2, 3, 9, 12, 15, 18, 40],
            &[1, 2, 4, 5, 6],
            &[1, 3, 4, 5],
            &[2, 2, 2, 9],
            &[1, 2, 3, 5, 7, 9, 10, 11, 12, 13],
            &[100],
        ];
        for &frames in cases {
            let mut expected = frames.to_vec();
            expected.sort_unstable();
            expected.dedup();
            for &pad in &[1usize, 4] {
                let tokens = condense_seq(frames, pad);
                assert!(tokens.len() <= expected.len(), "{:?}", tokens);
                let mut reexpanded = expand_seq_strs(&tokens);
                reexpanded.sort_unstable();
                assert_eq!(reexpanded, expected, "pad {} tokens {:?}", pad, tokens);
            }
        }
    }
}
