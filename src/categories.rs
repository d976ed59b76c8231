/// Catalog query endpoint (`dateStart`, `dateEnd`, `FileCategory`).
pub const QUERY_URL: &str = "https://www.admie.gr/getOperationMarketFilewRange";

/// Per-category metadata endpoint, no parameters.
pub const INFO_URL: &str = "https://www.admie.gr/getFiletypeInfo";

/// Pseudo-category that lists the available categories instead of downloading.
pub const INFO: &str = "info";

/// File categories published by the operator.
pub const CATEGORIES: [&str; 62] = [
    "AdhocISPResults",
    "CurrentLineOutages",
    "CurrentProtectionOutages",
    "CurrentSubstationOutages",
    "DailyAuctionsSpecificationsATC",
    "DailyEnergyBalanceAnalysis",
    "DayAheadLoadForecast",
    "DayAheadRESForecast",
    "DayAheadSchedulingRealTimeDeviations",
    "DayAheadSchedulingRequirements",
    "DayAheadSchedulingUnitAvailabilities",
    "Devit",
    "Devnor",
    "DispatchSchedulingResults",
    "ExPostImbalancePricingResults",
    "HVCUSTCONS",
    "IMBABE",
    "InterconnectionsMaintenanceSchedule",
    "IntraDayDispatchSchedulingResults",
    "ISP1DayAheadLoadForecast",
    "ISP1DayAheadRESForecast",
    "ISP1ISPResults",
    "ISP1Requirements",
    "ISP1UnitAvailabilities",
    "ISP2DayAheadLoadForecast",
    "ISP2DayAheadRESForecast",
    "ISP2ISPResults",
    "ISP2Requirements",
    "ISP2UnitAvailabilities",
    "ISP3IntraDayLoadForecast",
    "ISP3IntraDayRESForecast",
    "ISP3ISPResults",
    "ISP3Requirements",
    "ISP3UnitAvailabilities",
    "ISP4Requirements",
    "ISPWeekAheadLoadForecast",
    "LTPTRsNominationsSummary",
    "MonthlyLoadForecast",
    "MonthlyNTC",
    "MonthlySIPResults",
    "ProvisionalLineOutages",
    "ProvisionalProtectionOutages",
    "ProvisionalSubstationOutages",
    "RealTimeSCADAImportsExports",
    "RealTimeSCADARES",
    "RealTimeSCADASystemLoad",
    "recovery_cost",
    "ReservoirFillingRate",
    "RESMV",
    "RESMVLVPROD",
    "SignificantEvents",
    "SYSBOUNDS",
    "SystemEstimationsCorrections",
    "SystemRealizationSCADA",
    "UA_ANALYSIS",
    "UnitAvailabilities",
    "UnitProduction",
    "UnitsMaintenanceSchedule",
    "WeekAheadLoadForecast",
    "WeekAheadWaterUsageDeclaration",
    "YearlyLoadForecast",
    "YearlyWaterUsageDeclaration",
];

/// Case-sensitive membership test.
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_are_case_sensitive() {
        assert!(is_known_category("DayAheadLoadForecast"));
        assert!(is_known_category("recovery_cost"));
        assert!(!is_known_category("dayaheadloadforecast"));
        assert!(!is_known_category(INFO));
        assert!(!is_known_category(""));
    }

    #[test]
    fn categories_are_unique() {
        let mut sorted = CATEGORIES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), CATEGORIES.len());
    }
}
