extern crate fasta_comp;

use fasta_comp::comp::analyze;

#[test]
fn test_analyze() {
    let stats = analyze("ACGGGCATATGCGC");

    assert_eq!(stats.total(), 14);
    assert_eq!(
        stats.alphabet().collect::<Vec<_>>(),
        vec!['A', 'C', 'G', 'T']
    );

    let counts: Vec<_> = stats.counts().iter().map(|(&s, &n)| (s, n)).collect();
    assert_eq!(counts, vec![('A', 3), ('C', 4), ('G', 5), ('T', 2)]);

    let expected = [('A', 21.43), ('C', 28.57), ('G', 35.71), ('T', 14.29)];
    for (symbol, percent) in expected {
        assert!(
            (stats.percentage_of(symbol) - percent).abs() < 0.01,
            "unexpected percentage for {}: {}",
            symbol,
            stats.percentage_of(symbol)
        );
    }
}

#[test]
fn test_empty_sequence() {
    let stats = analyze("");

    assert_eq!(stats.total(), 0);
    assert!(stats.is_empty());
    assert_eq!(stats.alphabet().count(), 0);
    assert!(stats.counts().is_empty());
    assert!(stats.percentages().is_empty());
}

#[test]
fn test_counts_sum_to_total() {
    for seq in ["A", "ACGT", "ACGGGCATATGCGC", "MKTIIALSYIFCLVFADYKDDDDK"] {
        let stats = analyze(seq);
        assert_eq!(stats.counts().values().sum::<u64>(), stats.total());
        assert_eq!(stats.total(), seq.len() as u64);
    }
}

#[test]
fn test_alphabet_sorted_and_unique() {
    let stats = analyze("TGCATGCAXXNN");
    let alphabet: Vec<_> = stats.alphabet().collect();
    for pair in alphabet.windows(2) {
        assert!(pair[0] < pair[1], "alphabet not strictly ascending");
    }
    assert_eq!(alphabet, vec!['A', 'C', 'G', 'N', 'T', 'X']);
}

#[test]
fn test_percentages_sum_to_100() {
    for seq in ["A", "AC", "ACGGGCATATGCGC", "AUCGGAUCAU", "gattaca"] {
        let stats = analyze(seq);
        let sum: f64 = stats.percentages().values().sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum {} for {}", sum, seq);
    }
}

#[test]
fn test_case_canonicalization_idempotent() {
    let mixed = analyze("AcGgGcAtAtGcGc");
    let upper = analyze("ACGGGCATATGCGC");
    assert_eq!(mixed, upper);

    // canonicalization also applies to lookups
    assert_eq!(mixed.count_of('g'), mixed.count_of('G'));
    assert_eq!(mixed.percentage_of('a'), mixed.percentage_of('A'));
}

#[test]
fn test_single_symbol() {
    let stats = analyze("AAAA");
    assert_eq!(stats.total(), 4);
    assert_eq!(stats.count_of('A'), 4);
    assert_eq!(stats.percentage_of('A'), 100.0);
}

#[test]
fn test_absent_symbol() {
    let stats = analyze("ACGT");
    assert_eq!(stats.count_of('N'), 0);
    assert_eq!(stats.percentage_of('N'), 0.0);
}

#[test]
fn test_symbols_counted_per_char_not_per_byte() {
    // two-byte characters count as one symbol each
    let stats = analyze("ééA");
    assert_eq!(stats.total(), 3);
    assert_eq!(stats.count_of('é'), 2);
}

#[test]
fn test_protein_sequence() {
    let stats = analyze("MKTIIALSYIFCLVFADYKDDDDK");
    assert_eq!(stats.total(), 24);
    assert_eq!(stats.count_of('D'), 5);
    assert_eq!(stats.count_of('I'), 3);
    assert_eq!(stats.alphabet().count(), 12);
}
