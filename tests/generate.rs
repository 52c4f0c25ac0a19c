//! Testing kern feature generation end to end.

use expect_test::expect;
use kernfea::{FontData, Kerning, KernFeatureWriter, Name};
use maplit::btreemap;
use pretty_assertions::assert_eq;

fn n(s: &str) -> Name {
    s.parse().unwrap()
}

fn generate(font: &FontData) -> String {
    KernFeatureWriter::new(font).unwrap().write()
}

#[test]
fn empty_input_writes_nothing() {
    let font = FontData::new();
    assert_eq!(generate(&font), "");
}

#[test]
fn groups_without_kerning_write_nothing() {
    let font = FontData {
        groups: btreemap! { n("public.kern1.A") => vec![n("A"), n("Aacute")] },
        ..Default::default()
    };
    assert_eq!(generate(&font), "");
}

#[test]
fn pure_glyph_conflict_narrows_class_rule() {
    // the glyph pair rule for (A, B) wins over the class rule, which is
    // narrowed to its surviving member
    let font = FontData {
        kerning: btreemap! {
            n("A") => btreemap! { n("B") => -10.0, n("C") => -10.0 },
            n("public.kern1.one") => btreemap! { n("B") => -20.0 },
        },
        groups: btreemap! { n("public.kern1.one") => vec![n("A"), n("D")] },
        ..Default::default()
    };

    assert_eq!(
        generate(&font),
        "\nfeature kern {\n    pos A B -10;\n    pos A C -10;\n    subtable;\n    enum pos [D] B -20;\n} kern;"
    );
}

#[test]
fn class_pair_rule_with_single_overlap_is_kept_whole() {
    // regression pin: (A, X) is claimed by the glyph pair rule, but A still
    // appears in the kept pair (A, Y) and X in (B, X), so the cross-product
    // narrowing leaves both sides untouched. Conflicts are only resolved
    // against more specific buckets and earlier rules, not re-verified
    // pairwise.
    let font = FontData {
        kerning: btreemap! {
            n("A") => btreemap! { n("X") => -5.0 },
            n("public.kern1.L") => btreemap! { n("public.kern2.R") => -15.0 },
        },
        groups: btreemap! {
            n("public.kern1.L") => vec![n("A"), n("B")],
            n("public.kern2.R") => vec![n("X"), n("Y")],
        },
        ..Default::default()
    };

    let fea = generate(&font);
    let expected = expect![[r#"
        @public.kern1.L = [A B];
        @public.kern2.R = [X Y];

        feature kern {
            pos A X -5;
            subtable;
            pos @public.kern1.L @public.kern2.R -15;
        } kern;"#]];
    expected.assert_eq(&fea);
}

#[test]
fn class_pair_rule_narrows_when_member_loses_every_pair() {
    // with both (A, X) and (A, Y) claimed by glyph pair rules, A drops off
    // the left side of the class pair rule; the value is unchanged
    let font = FontData {
        kerning: btreemap! {
            n("A") => btreemap! { n("X") => -5.0, n("Y") => -6.0 },
            n("public.kern1.L") => btreemap! { n("public.kern2.R") => -15.0 },
        },
        groups: btreemap! {
            n("public.kern1.L") => vec![n("A"), n("B")],
            n("public.kern2.R") => vec![n("X"), n("Y")],
        },
        ..Default::default()
    };

    let fea = generate(&font);
    let expected = expect![[r#"
        @public.kern2.R = [X Y];

        feature kern {
            pos A X -5;
            pos A Y -6;
            subtable;
            pos [B] @public.kern2.R -15;
        } kern;"#]];
    expected.assert_eq(&fea);
}

#[test]
fn illegal_group_name_is_corrected_everywhere() {
    // the group name contains a space; the definition line and the rule
    // both use the corrected identifier, the value is preserved
    let font = FontData {
        kerning: btreemap! {
            n("public.kern1.A acute") => btreemap! { n("V") => -50.0 },
        },
        groups: btreemap! {
            n("public.kern1.A acute") => vec![n("Aacute"), n("Agrave")],
        },
        ..Default::default()
    };

    let fea = generate(&font);
    let expected = expect![[r#"
        @public.kern1.Aacute = [Aacute Agrave];

        feature kern {
            subtable;
            enum pos @public.kern1.Aacute V -50;
        } kern;"#]];
    expected.assert_eq(&fea);
}

#[test]
fn corrected_name_collisions_get_numeric_suffixes() {
    // both group names strip to the same identifier; the first (in sorted
    // order) takes it, the second gets the first free suffix
    let font = FontData {
        kerning: btreemap! {
            n("public.kern1.A+B") => btreemap! { n("x") => -1.0 },
            n("public.kern1.AB") => btreemap! { n("x") => -2.0 },
        },
        groups: btreemap! {
            n("public.kern1.A+B") => vec![n("one")],
            n("public.kern1.AB") => vec![n("two")],
        },
        ..Default::default()
    };

    let fea = generate(&font);
    let expected = expect![[r#"
        @public.kern1.AB = [one];
        @public.kern1.AB_1 = [two];

        feature kern {
            subtable;
            enum pos @public.kern1.AB x -1;
            enum pos @public.kern1.AB_1 x -2;
        } kern;"#]];
    expected.assert_eq(&fea);
}

#[test]
fn fea_classes_resolve_through_key_glyphs() {
    // kerning on the key glyphs A and colon stands in for the declared
    // classes; the classes themselves are not re-defined in the output
    let font = FontData {
        kerning: btreemap! {
            n("A") => btreemap! { n("O") => -40.0, n("x") => -12.0 },
            n("y") => btreemap! { n("O") => -7.0 },
            n("B") => btreemap! { n("C") => -3.0 },
        },
        features: "@MMK_L_A = [A Aacute];\n@MMK_R_O = [O Q];\n".into(),
        ..Default::default()
    };

    let fea = generate(&font);
    let expected = expect![[r#"

        feature kern {
            pos B C -3;
            subtable;
            enum pos @MMK_L_A x -12;
            subtable;
            enum pos y @MMK_R_O -7;
            subtable;
            pos @MMK_L_A @MMK_R_O -40;
        } kern;"#]];
    expected.assert_eq(&fea);
}

#[test]
fn generation_is_deterministic() {
    let font = combined_font();
    let first = generate(&font);
    let second = generate(&combined_font());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn caller_supplied_line_ending_is_used() {
    let font = FontData {
        kerning: btreemap! { n("A") => btreemap! { n("B") => -10.0 } },
        ..Default::default()
    };
    let fea = KernFeatureWriter::new(&font).unwrap().write_with_line_ending("\r\n");
    assert_eq!(fea, "\r\nfeature kern {\r\n    pos A B -10;\r\n} kern;");
}

#[test]
fn combined_generation_snapshot() {
    let fea = generate(&combined_font());
    let expected = expect![[r#"
        @public.kern1.round = [O Q];
        @public.kern2.Vwedge = [V W];

        feature kern {
            pos D B -5;
            pos O V -100;
            pos Q T -2;
            subtable;
            enum pos @MMK_L_A V -25;
            enum pos [O] T -35;
            subtable;
            enum pos T @MMK_R_colon -15;
            subtable;
            pos @MMK_L_A @MMK_R_colon -30;
            pos @public.kern1.round @public.kern2.Vwedge -80;
        } kern;"#]];
    expected.assert_eq(&fea);
}

/// A font exercising every rule source at once: feature classes resolved
/// through key glyphs, group classes (one with an illegal name), glyph
/// pairs that shadow class rules, and a class pair rule.
fn combined_font() -> FontData {
    let kerning: Kerning = btreemap! {
        n("A") => btreemap! { n("colon") => -30.0, n("V") => -25.0 },
        n("D") => btreemap! { n("B") => -5.0 },
        n("O") => btreemap! { n("V") => -100.0 },
        n("Q") => btreemap! { n("T") => -2.0 },
        n("T") => btreemap! { n("colon") => -15.0 },
        n("public.kern1.round") => btreemap! {
            n("public.kern2.V wedge") => -80.0,
            n("T") => -35.0,
        },
    };
    let groups = btreemap! {
        n("public.kern1.round") => vec![n("O"), n("Q")],
        n("public.kern2.V wedge") => vec![n("V"), n("W")],
        n("guides") => vec![n("gx")],
    };
    let features = "\
# existing classes
@MMK_L_A = [A Aacute];
@MMK_R_colon = [colon semicolon];
"
    .to_string();
    FontData { kerning, groups, features }
}
