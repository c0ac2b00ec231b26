use super::*;

fn entry(risk: Option<RiskLevel>, urgency: Option<Urgency>, airworthy: bool) -> LogEntry {
    LogEntry { risk_level: risk, urgency, is_airworthy: airworthy, ..LogEntry::default() }
}

#[test]
fn no_entries_is_unknown_and_airworthy() {
    assert_eq!(risk_consensus(&[]), Consensus::Unknown);
    assert_eq!(urgency_consensus(&[]), Consensus::Unknown);
    assert!(overall_airworthy(&[]));
}

#[test]
fn single_entry_reports_its_values() {
    let entries = [entry(Some(RiskLevel::High), Some(Urgency::Normal), false)];
    assert_eq!(risk_consensus(&entries), Consensus::Uniform(RiskLevel::High));
    assert_eq!(urgency_consensus(&entries), Consensus::Uniform(Urgency::Normal));
    assert!(!overall_airworthy(&entries));
}

#[test]
fn differing_values_are_mixed() {
    let entries = [
        entry(Some(RiskLevel::Low), Some(Urgency::High), true),
        entry(Some(RiskLevel::High), Some(Urgency::High), true),
    ];
    assert_eq!(risk_consensus(&entries), Consensus::Mixed);
    assert_eq!(urgency_consensus(&entries), Consensus::Uniform(Urgency::High));
    assert!(overall_airworthy(&entries));
}

#[test]
fn empty_value_disagrees_with_a_set_one() {
    let entries = [entry(Some(RiskLevel::Low), None, true), entry(None, None, true)];
    assert_eq!(risk_consensus(&entries), Consensus::Mixed);
    assert_eq!(urgency_consensus(&entries), Consensus::Unknown);
}

#[test]
fn one_grounded_entry_grounds_the_record() {
    let entries = [entry(None, None, true), entry(None, None, false), entry(None, None, true)];
    assert!(!overall_airworthy(&entries));
}

#[test]
fn consensus_display_text() {
    assert_eq!(Consensus::<RiskLevel>::Unknown.to_string(), "Unknown");
    assert_eq!(Consensus::<RiskLevel>::Mixed.to_string(), "Mixed");
    assert_eq!(Consensus::Uniform(RiskLevel::Medium).to_string(), RiskLevel::Medium.to_string());
}

#[test]
fn palette_matches_levels() {
    assert_eq!(risk_color(Some(&RiskLevel::High)), RED);
    assert_eq!(risk_color(Some(&RiskLevel::Medium)), YELLOW);
    assert_eq!(risk_color(Some(&RiskLevel::Low)), GREEN);
    assert_eq!(risk_color(None), GREY);
    assert_eq!(urgency_color(Some(&Urgency::Normal)), GREEN);
    assert_eq!(airworthy_color(false), RED);
    assert_eq!(consensus_color(&Consensus::Uniform(RiskLevel::High), risk_color), RED);
    assert_eq!(consensus_color(&Consensus::<RiskLevel>::Mixed, risk_color), GREY);
}

#[test]
fn list_row_palette() {
    assert_eq!(risk_text_color(Some(&RiskLevel::High)), "text-red-600");
    assert_eq!(risk_text_color(Some(&RiskLevel::Medium)), "text-yellow-600");
    assert_eq!(risk_text_color(Some(&RiskLevel::Low)), "text-green-600");
    assert_eq!(risk_text_color(None), "text-gray-400");
}

#[test]
fn off_scale_values_display_verbatim_in_grey() {
    let critical = RiskLevel::Other("Critical".to_owned());
    let entries = [entry(Some(critical.clone()), Some(Urgency::Other("Low".to_owned())), true)];
    let risk = risk_consensus(&entries);
    assert_eq!(risk, Consensus::Uniform(critical.clone()));
    assert_eq!(risk.to_string(), "Critical");
    assert_eq!(urgency_consensus(&entries).to_string(), "Low");
    assert_eq!(consensus_color(&risk, risk_color), GREY);
    assert_eq!(risk_text_color(Some(&critical)), "text-gray-400");
}
