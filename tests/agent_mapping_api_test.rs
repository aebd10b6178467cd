// ==========================================
// AgentApi / MappingApi 集成测试
// ==========================================


use hotel_rms::api::ApiError;
use hotel_rms::domain::types::AgentKind;
use test_helpers::build_state;

#[test]
fn test_agent_toggle_and_regenerate() {
    let state = build_state(55, 10);
    assert_eq!(state.agent_api.list_agents().unwrap().len(), 8);

    let agent = state.agent_api.set_agent_enabled("weather", false).expect("切换失败");
    assert!(!agent.enabled);
    assert_eq!(agent.id, AgentKind::Weather);

    let next = state.regenerate().expect("重新生成失败");
    assert_eq!(next.snapshot.seed, state.snapshot.seed);
    assert!(!next.snapshot.agent_forecasts.contains_key(&AgentKind::Weather));
    assert_eq!(
        next.snapshot.agent_series(AgentKind::Demand),
        state.snapshot.agent_series(AgentKind::Demand)
    );
}

#[test]
fn test_unknown_agent_not_found() {
    let state = build_state(55, 3);
    assert!(matches!(state.agent_api.get_agent("oracle"), Err(ApiError::NotFound(_))));
    assert!(matches!(
        state.agent_api.set_agent_enabled("oracle", true),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_competitor_mapping_flow() {
    let state = build_state(55, 3);
    let api = &state.mapping_api;

    let hotel = api.add_hotel("Harbor View Hotel").expect("登记失败");
    assert!(api.list_hotels().unwrap().iter().any(|h| h.id == hotel.id));
    assert!(matches!(api.add_hotel("Harbor View Hotel"), Err(ApiError::InvalidInput(_))));
    assert!(matches!(api.add_hotel("   "), Err(ApiError::InvalidInput(_))));

    let mappings = api
        .add_mapping(&hotel.id, "deluxe", "Premium King")
        .expect("映射失败");
    assert_eq!(mappings.len(), 1);

    assert!(matches!(
        api.add_mapping(&hotel.id, "penthouse", "Top Floor"),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        api.add_mapping("nowhere", "deluxe", "King"),
        Err(ApiError::NotFound(_))
    ));

    let mappings = api
        .remove_mapping(&hotel.id, "deluxe", "Premium King")
        .expect("删除失败");
    assert!(mappings.is_empty());
    assert!(matches!(
        api.remove_mapping(&hotel.id, "deluxe", "Premium King"),
        Err(ApiError::NotFound(_))
    ));
}
