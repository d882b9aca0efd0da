use super::*;
use crate::sequence::normalize::{FALLBACK_SEQUENCE, normalize};

#[test]
fn aaag_counts_and_percentages() {
    let stats = Statistics::from_sequence(&normalize(Some("AAAG")));
    assert_eq!(stats.distinct(), 2);

    let a = stats.get(AminoAcid::A).unwrap();
    assert_eq!(a.count, 3);
    assert_eq!(a.percentage_label(), "75.0");

    let g = stats.get(AminoAcid::G).unwrap();
    assert_eq!(g.count, 1);
    assert_eq!(g.percentage_label(), "25.0");

    assert!(stats.get(AminoAcid::W).is_none());
}

#[test]
fn counts_sum_to_length_and_percentages_to_about_100() {
    for raw in [
        "AAAG",
        "ACDEFGHIKLMNPQRSTVWY",
        "MKKLLPTAAAGLLLLAAQPAMA",
        FALLBACK_SEQUENCE,
        "CCCCCCCWY",
    ] {
        let seq = normalize(Some(raw));
        let stats = Statistics::from_sequence(&seq);
        let count_sum: usize = stats.iter().map(|(_, s)| s.count).sum();
        assert_eq!(count_sum, seq.len());
        assert_eq!(stats.total(), seq.len());

        let pct_sum: f64 = stats.iter().map(|(_, s)| s.percentage).sum();
        assert!((pct_sum - 100.0).abs() <= 0.5, "{raw}: {pct_sum}");
    }
}

#[test]
fn percentages_round_to_one_decimal() {
    let stats = Statistics::from_sequence(&normalize(Some("AAG")));
    assert_eq!(stats.get(AminoAcid::A).unwrap().percentage_label(), "66.7");
    assert_eq!(stats.get(AminoAcid::G).unwrap().percentage_label(), "33.3");
}

#[test]
fn ordered_view_breaks_ties_by_first_appearance() {
    // W and C tie at 2, W appears first; K and A tie at 1, K appears first.
    let stats = Statistics::from_sequence(&normalize(Some("WKCWGGGCA")));
    let order: Vec<char> = stats
        .by_count_desc()
        .iter()
        .map(|(aa, _)| aa.as_char())
        .collect();
    assert_eq!(order, vec!['G', 'W', 'C', 'K', 'A']);
}
