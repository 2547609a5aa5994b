/*!
Spelling suggestions for unrecognized flags, subtools, and values.
*/

/// Suggest the entries of `dictionary` that are plausible misspellings of
/// `input`, closest first. Ties are broken alphabetically, and duplicates are
/// removed.
#[must_use]
pub fn spelling<'a>(input: &str, dictionary: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let threshold = threshold(input);

    let mut candidates: Vec<(usize, &str)> = dictionary
        .into_iter()
        .filter(|&word| word != input)
        .filter_map(|word| {
            let distance = edit_distance(input, word);
            (distance <= threshold).then_some((distance, word))
        })
        .collect();

    candidates.sort_unstable();
    candidates.dedup_by(|a, b| a.1 == b.1);

    match candidates.first() {
        // Only report the best tier of candidates
        Some(&(best, _)) => candidates
            .into_iter()
            .take_while(|&(distance, _)| distance == best)
            .map(|(_, word)| word.to_owned())
            .collect(),
        None => Vec::new(),
    }
}

/// The largest edit distance still considered a typo of `input`. Short words
/// tolerate a single edit; longer ones tolerate roughly one edit in four.
fn threshold(input: &str) -> usize {
    input.chars().count().div_ceil(4).max(1)
}

/// Optimal string alignment distance: insertions, deletions, substitutions,
/// and transpositions of adjacent characters each cost 1.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Three rolling rows: two back, previous, current
    let mut before: Vec<usize> = vec![0; b.len() + 1];
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;

        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            let mut best = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(before[j - 2] + 1);
            }

            current[j] = best;
        }

        std::mem::swap(&mut before, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
