//! End-to-end run of the analysis pipeline against a stand-in model service.

use async_trait::async_trait;
use crypto_analyst::{
    AnalysisClient, AnalysisError, Citation, GenerateOptions, ModelService, RawModelResponse,
    RiskLevel, UpstreamError, Verdict,
};
use std::sync::{Arc, Mutex};

const FENCED_REPLY: &str = r###"Here is my analysis of Bitcoin based on the latest data:

```json
{
  "coin": "Bitcoin (BTC)",
  "currentPrice": "$67,250",
  "verdict": "BUY",
  "confidenceScore": 82,
  "riskLevel": "MEDIUM",
  "summary": "Spot ETF inflows and a 'post-halving' supply squeeze favour upside.",
  "detailedAnalysis": "## Technical Picture\nBTC reclaimed the 200-day MA.\n\n## Fundamentals\nHash rate at record highs.",
  "keyFactors": ["ETF inflows", "Halving supply shock", "Fed rate path", "Exchange reserves falling"],
  "entryPrice": "$64,000 - $66,000",
  "takeProfit": "$82,000",
  "stopLoss": "$59,500",
  "predictedTrend": [
    { "label": "Current", "price": 67250 },
    { "label": "Month 1", "price": 70500 },
    { "label": "Month 2", "price": 76000 },
    { "label": "Month 3", "price": 81000 }
  ]
}
```

Let me know if you want a deeper dive into the on-chain metrics!"###;

struct RecordingService {
    reply: RawModelResponse,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ModelService for RecordingService {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<RawModelResponse, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

#[tokio::test]
async fn bitcoin_analysis_end_to_end() {
    let service = Arc::new(RecordingService {
        reply: RawModelResponse {
            text: Some(FENCED_REPLY.to_string()),
            citations: vec![
                Citation::new("Bitcoin price today", "https://www.coingecko.com/en/coins/bitcoin"),
                Citation {
                    title: Some("Untitled".to_string()),
                    uri: None,
                },
                Citation::new("ETF flows", "https://farside.co.uk/btc/"),
            ],
        },
        prompts: Mutex::new(Vec::new()),
    });
    let client = AnalysisClient::new(service.clone());

    let result = client.analyze("Bitcoin (BTC)").await.unwrap();

    let prompts = service.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Bitcoin (BTC)"));
    assert!(prompts[0].contains(r#""BUY" | "SELL" | "HOLD" | "WAIT""#));

    assert_eq!(result.subject, "Bitcoin (BTC)");
    assert_eq!(result.verdict, Verdict::Buy);
    assert_eq!(result.confidence_score, 82.0);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.predicted_trend.len(), 4);
    assert_eq!(result.predicted_trend[0].label, "Current");
    assert_eq!(result.predicted_trend[3].price, 81000.0);
    assert_eq!(result.key_factors.len(), 4);
    assert!(result.detailed_analysis.contains("\n\n## Fundamentals"));

    let uris: Vec<&str> = result.sources.iter().map(|s| s.uri.as_str()).collect();
    assert_eq!(
        uris,
        vec![
            "https://www.coingecko.com/en/coins/bitcoin",
            "https://farside.co.uk/btc/"
        ]
    );
}

#[tokio::test]
async fn conversational_refusal_is_malformed() {
    let service = Arc::new(RecordingService {
        reply: RawModelResponse {
            text: Some("I can't predict prices, but {here is a thought}.".to_string()),
            citations: vec![],
        },
        prompts: Mutex::new(Vec::new()),
    });

    let err = AnalysisClient::new(service)
        .analyze("Pepe")
        .await
        .unwrap_err();

    match err {
        AnalysisError::MalformedResponse { reason, raw } => {
            assert!(reason.contains("not valid JSON"));
            assert!(raw.starts_with("I can't predict prices"));
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}
