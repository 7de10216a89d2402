//! End-to-end expansion scenarios, checked against `hunspell -G` output
//! for the same fixtures.

use hunaftool::aff::AffData;
use hunaftool::expand::Expander;

fn expand_sorted(aff: &str, dic_line: &str) -> Vec<String> {
    let data = AffData::parse(aff, dic_line).expect("affix file parses");
    let mut words: Vec<String> = Expander::new(&data)
        .expand_line(dic_line)
        .expect("entry expands")
        .iter()
        .map(|w| w.to_string())
        .collect();
    let unsorted = words.len();
    words.sort();
    words.dedup();
    assert_eq!(unsorted, words.len(), "expansion yielded duplicates");
    words
}

#[test]
fn basic_cross_product() {
    let aff = "\
PFX A Y 1
PFX A ааа ба ааа
SFX B Y 1
SFX B ааа ав ааа
";
    assert_eq!(
        expand_sorted(aff, "ааааа/AB"),
        ["ааааа", "ааав", "бааа", "бав"]
    );
}

#[test]
fn prefix_applies_after_suffix_rewrite() {
    // The prefix condition matches neither the stem nor anything the
    // prefix alone could produce; it only matches the suffixed form.
    let aff = "\
PFX A Y 1
PFX A аая бю аая
SFX B Y 1
SFX B ааа яв ааа
";
    assert_eq!(expand_sorted(aff, "ааааа/AB"), ["ааааа", "ааяв", "бюв"]);
}

#[test]
fn fullstrip_unlocks_full_word_prefix() {
    let aff = "\
FULLSTRIP
PFX A Y 2
PFX A лыжка сьвіньня лыжка
PFX A лыж шчот лыж
SFX B Y 1
SFX B екар ыжка лекар
";
    assert_eq!(
        expand_sorted(aff, "лекар/AB"),
        ["лекар", "лыжка", "сьвіньня", "шчотка"]
    );
}

#[test]
fn needaffix_suppresses_the_bare_stem() {
    let aff = "\
PFX A Y 2
PFX A лыжка сьвіньня лыжка
PFX A лыж шчот лыж
SFX B Y 1
SFX B екар ыжка лекар
NEEDAFFIX z
";
    // Without FULLSTRIP the full-word prefix product is gone too.
    assert_eq!(expand_sorted(aff, "лекар/ABz"), ["лыжка", "шчотка"]);
}

#[test]
fn two_level_suffix_with_continuation() {
    let aff = "\
PFX X Y 1
PFX X аая бю ааяр
SFX Y Y 1
SFX Y ааа яв/Z ааа
SFX Z Y 1
SFX Z в ргер в
SFX C Y 1
SFX C ка 0/ABz ка
NEEDAFFIX z
";
    assert_eq!(
        expand_sorted(aff, "ааааа/XY"),
        ["ааааа", "ааяв", "ааяргер", "бюргер"]
    );
}

#[test]
fn long_flags_expand_identically() {
    let aff = "\
FLAG long
PFX Aa Y 1
PFX Aa ааа ба ааа
SFX Bb Y 1
SFX Bb ааа ав ааа
";
    assert_eq!(
        expand_sorted(aff, "ааааа/AaBb"),
        ["ааааа", "ааав", "бааа", "бав"]
    );
}

#[test]
fn num_flags_expand_identically() {
    let aff = "\
FLAG num
PFX 1 Y 1
PFX 1 ааа ба ааа
SFX 2 Y 1
SFX 2 ааа ав ааа
";
    assert_eq!(
        expand_sorted(aff, "ааааа/1,2"),
        ["ааааа", "ааав", "бааа", "бав"]
    );
}

#[test]
fn undeclared_dictionary_flags_are_ignored() {
    let aff = "\
SFX B Y 1
SFX B ааа ав ааа
";
    assert_eq!(expand_sorted(aff, "ааааа/BQ"), ["ааааа", "ааав"]);
}

#[test]
fn cross_product_no_blocks_composition() {
    // The prefix still applies alone, but not on the suffixed form.
    let aff = "\
PFX A N 1
PFX A ааа ба ааа
SFX B Y 1
SFX B ааа ав ааа
";
    assert_eq!(
        expand_sorted(aff, "ааааа/AB"),
        ["ааааа", "ааав", "бааа"]
    );
}

#[test]
fn hashed_flag_representation_expands_identically() {
    // Registering 63 flags pushes the registry past the packed-set
    // limit; the expansion result must not change.
    let mut aff = String::from("FLAG num\n");
    for n in 1..=63 {
        aff.push_str(&format!("SFX {n} Y 1\nSFX {n} 0 e{n} .\n"));
    }
    assert_eq!(expand_sorted(&aff, "b/1,2"), ["b", "be1", "be2"]);
}

#[test]
fn flag_after_rule_blocks_is_honored() {
    let aff = "\
SFX Bb Y 1
SFX Bb ааа ав ааа
FLAG long
";
    assert_eq!(expand_sorted(aff, "ааааа/Bb"), ["ааааа", "ааав"]);
}
