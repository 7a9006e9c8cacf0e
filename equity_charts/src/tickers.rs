//! Random large-cap ticker for "surprise me" lookups.

use rand::seq::IndexedRandom;

/// Large-cap US symbols the random pick draws from.
pub const LARGE_CAP_TICKERS: &[&str] = &[
    "AAPL", "NVDA", "MSFT", "GOOGL", "GOOG", "AMZN", "META", "BRK-B", "LLY", "AVGO", "TSLA",
    "JPM", "WMT", "UNH", "XOM", "V", "MA", "PG", "JNJ", "COST", "ORCL", "HD", "ABBV", "BAC",
    "KO", "NFLX", "MRK", "CVX", "CRM", "ADBE", "AMD", "PEP", "TMUS", "TMO", "LIN", "ACN",
    "MCD", "CSCO", "ABT", "DHR", "WFC", "TXN", "QCOM", "PM", "GE", "IBM", "AXP", "AMGN",
    "VZ", "INTU", "NOW", "ISRG", "CAT", "BX", "DIS", "NEE", "MS", "PFE", "AMAT", "GS",
    "RTX", "SPGI", "CMCSA", "UBER", "UNP", "LOW", "PGR", "T", "TJX", "SYK", "LMT", "HON",
    "REGN", "COP", "BLK", "BKNG", "NKE", "ELV", "VRTX", "PLD", "ETN", "SCHW", "C", "BSX",
    "MDT", "PANW", "KKR", "ADI", "CB", "UPS", "ADP", "MMC", "MU", "SBUX", "ANET", "KLAC",
    "BA", "LRCX", "DE", "AMT", "HCA", "CI", "BMY", "FI", "GILD", "MDLZ", "SO", "ICE", "SHW",
    "MO", "MCO", "DUK", "INTC", "CL", "WM", "ZTS", "SNPS", "APH", "CTAS", "GD", "TT",
    "EQIX", "PH", "CME", "CMG", "NOC", "EOG", "CVS", "ITW", "PYPL", "CDNS", "AON", "TGT",
    "ABNB", "TDG", "FDX", "WELL", "MMM", "MSI", "USB", "MCK", "PNC", "ECL", "BDX", "CSX",
    "ORLY", "RSG", "FCX", "SLB", "CARR", "CRWD", "NXPI", "MAR", "AJG", "SPG", "APD", "DHI",
    "CEG", "AFL", "EMR", "NEM", "PSA", "TFC", "ROP", "MPC", "FTNT", "PSX", "WMB", "ADSK",
    "NSC", "GM", "COF", "AZO", "O", "HLT", "AEP", "OXY", "MET", "SRE", "OKE", "ROST", "TRV",
    "CHTR", "CPRT", "GEV", "DLR", "PCAR", "LEN", "PCG", "BK", "URI", "CCI", "KDP", "KMB",
    "ALL", "AIG", "JCI", "KMI", "GWW", "D", "PAYX", "TEL", "MNST", "COR", "VLO", "MPWR",
    "MSCI", "IQV", "STZ", "F", "FIS", "KHC", "LHX", "AMP", "MCHP", "ODFL", "HES", "CMI",
    "HUM", "PRU", "KVUE", "FICO", "RCL", "EW", "ACGL", "CNC", "NDAQ", "A", "PEG", "PWR",
    "IDXX", "HSY", "GIS", "HWM", "EA", "EXR", "AME", "FAST", "GEHC", "CTVA", "VRSK", "KR",
    "CTSH", "EXC", "YUM", "DOW", "SYY", "OTIS", "EFX", "IT", "IR", "GLW", "SMCI", "CBRE",
    "NUE", "BKR", "FANG", "ED", "HPQ", "VICI", "GRMN", "XEL", "DD", "LULU", "EL", "DFS",
    "IRM", "MLM", "RMD", "HIG", "VMC", "XYL", "EIX", "ON", "CSGP", "TRGP", "LYB", "MRNA",
    "AVB", "CDW", "ROK", "MTD", "LVS", "BIIB", "PPG", "DXCM", "TSCO", "WEC", "BRO", "VST",
    "ADM", "WTW", "WAB", "EBAY", "EQR", "FITB", "DVN", "NVR", "HAL", "TTWO", "GPN", "ANSS",
    "MTB", "K", "PHM", "VLTO", "AWK", "DG", "AXON", "NTAP", "CAH", "KEYS", "DAL", "DTE",
    "IFF", "FTV", "ETR", "STT", "DOV", "FE", "FSLR", "HPE", "CHD", "HST", "VTR", "SBAC",
    "BR", "TYL", "RJF", "TROW", "ROL", "DECK", "SW", "ES", "PPL", "ZBH", "STE", "GDDY",
    "TSN", "WY", "LYV", "CBOE", "WRB", "AEE", "STX", "WST", "INVH", "CCL", "TER", "WDC",
    "BF-B", "ARE", "MKC", "HBAN", "PTC", "CPAY", "LDOS", "RF", "DLTR", "CINF", "HUBB",
    "BLDR", "MOH", "CMS", "ATO", "WBD", "WAT", "GPC", "TDY", "EQT", "ESS", "BALL", "BAX",
    "OMC", "LH", "SYF", "CLX", "BBY", "CFG", "MAA", "STLD", "COO", "J", "HOLX", "DRI",
    "PFG", "PKG", "FOXA", "FOX", "JBHT", "ZBRA", "NTRS", "ULTA", "CTRA", "EXPE", "HRL",
    "VRSN", "CNP", "L", "MAS", "AVY", "EXPD", "ALGN", "NRG", "SWKS", "DGX", "APTV", "IP",
    "LUV", "TXT", "EG", "ENPH", "UDR", "AMCR", "NWS", "NWSA", "GEN", "MRO", "KIM", "KEY",
    "DOC", "FDS", "UHS", "SWK", "IEX", "AKAM", "CPB", "RVTY", "LNT", "SNA", "CAG", "DPZ",
    "CF", "NI", "NDSN", "CE", "PNR", "BG", "UAL", "VTRS", "TRMB", "POOL", "EVRG", "KMX",
    "CPT", "BXP", "REG", "DVA", "SJM", "JNPR", "AES", "PODD", "INCY", "JBL", "JKHY", "IPG",
    "AOS", "CHRW", "ALLE", "EMN", "FFIV", "MGM", "TFX", "EPAM", "TECH", "LKQ", "TAP", "HII",
    "BEN", "CTLT", "APA", "QRVO", "SOLV", "RL", "CRL", "ALB", "AIZ", "PNW", "MHK", "FRT",
    "MTCH", "HAS", "GNRC", "PAYC", "TPR", "DAY", "GL", "MOS", "HSIC", "WBA", "LW", "MKTX",
    "BIO", "WYNN", "FMC", "CZR", "PARA", "BBWI", "IVZ", "BWA", "NCLH", "AAL", "ETSY",
];

/// A ticker drawn uniformly from [`LARGE_CAP_TICKERS`].
pub fn random_ticker() -> &'static str {
    random_ticker_with(&mut rand::rng())
}

/// Same as [`random_ticker`] with a caller-supplied generator.
pub fn random_ticker_with<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static str {
    LARGE_CAP_TICKERS.choose(rng).copied().unwrap_or("AAPL")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn list_is_clean() {
        let unique: HashSet<_> = LARGE_CAP_TICKERS.iter().collect();
        assert_eq!(unique.len(), LARGE_CAP_TICKERS.len());
        assert!(LARGE_CAP_TICKERS.iter().all(|t| t.chars().all(|c| c.is_ascii_uppercase() || c == '-')));
    }

    #[test]
    fn picks_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(LARGE_CAP_TICKERS.contains(&random_ticker_with(&mut rng)));
        }
        assert!(LARGE_CAP_TICKERS.contains(&random_ticker()));
    }
}
