use rs_nlp_core::analysis::TextAnalyzer;
use rs_nlp_core::sentiment::SentimentAnalyzer;
use rs_nlp_core::text::summarizer::summarize;
use rs_nlp_core::text::tokens::TokenCache;
use rs_nlp_core::translation::{Language, TranslationRequest};
use rs_nlp_core::wordcloud::WordCloud;

const TEXT: &str = "Rust is a wonderful language. The compiler is strict, but the compiler \
    is also very helpful. Rust programs are fast and the Rust community is friendly.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Top 3 most frequent words, ties go to the word seen first
    println!("Summary: {}", summarize(TEXT, 3));

    // Full report: stats, stopwords, processed text, word cloud, tokens and summary.
    // The cache memoizes token analyses by cleaned input text
    let analyzer = TextAnalyzer::default();
    let mut cache = TokenCache::new(8);
    let report = analyzer.analyze(TEXT, 5, &mut cache)?;

    println!("Length of Text: {}", report.stats.length);
    println!("Num of Vowels: {}", report.stats.num_vowels);
    println!("Num of Consonants: {}", report.stats.num_consonants);
    println!("Num of Stopwords: {}", report.stats.num_stopwords);
    println!("Stopwords: {:?}", report.stopwords);
    println!("Stopwords excluded: {}", report.processed_text);
    for token in report.tokens.iter().take(5) {
        println!("{token}");
    }

    // Empty text is refused with the message shown to users
    match analyzer.analyze("", 5, &mut cache) {
        Ok(_) => println!("Should not happen"),
        Err(warning) => println!("Empty text: {warning}"),
    }

    // Sentiment: polarity in [-1, 1], subjectivity in [0, 1]
    let sentiment = SentimentAnalyzer::default().analyze(TEXT);
    println!("{sentiment}");

    // The word cloud uses a fixed random state, so the SVG is reproducible
    let layout = WordCloud::default().with_random_state(42).generate(&report.processed_text)?;
    std::fs::write("wordcloud.svg", layout.to_svg())?;
    println!("Word cloud with {} words written to wordcloud.svg", layout.words.len());

    // Translation requests are validated and chunked locally;
    // the server sends them to the translation service
    for lang in Language::ALL {
        println!("{} -> {}", lang.name(), lang.code());
    }
    let request = TranslationRequest::new(TEXT, "german".parse()?)?;
    println!("{} chunk(s) to translate to {}", request.chunks().len(), request.target());
    match TranslationRequest::new("hi", Language::French) {
        Ok(_) => println!("Should not happen"),
        Err(warning) => println!("Short text: {warning}"),
    }

    Ok(())
}
