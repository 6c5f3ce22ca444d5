//! Content Templater — typed briefs per content type, rendered to title,
//! headings and a markdown body.
//!
//! All randomness is drawn when a brief is built; `render` is pure. The drawn
//! "result" figures (satisfaction %, ratings, gains) are flavour text and are
//! not reproducible unless the random source is seeded.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::competitor::CompetitorInsights;
use crate::models::content::ContentType;
use crate::models::keyword::{Intent, KeywordStats};
use crate::text::format_thousands;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBrief {
    pub keyword: String,
    pub search_volume: u32,
    pub difficulty: u8,
    pub related_terms: Vec<String>,
    pub competitor_topics: usize,
    pub competitor_length: u32,
    pub visibility_gain: u32,
    pub conversion_gain: u32,
    pub cost_reduction: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogBrief {
    pub keyword: String,
    pub search_volume: u32,
    pub difficulty: u8,
    pub intent: Intent,
    pub related_terms: Vec<String>,
    pub competitor_topics: usize,
    pub competitor_length: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceBrief {
    pub keyword: String,
    pub search_volume: u32,
    pub difficulty: u8,
    pub cpc: f64,
    pub competitor_topics: usize,
    pub year: i32,
    pub satisfaction: u32,
    pub performance: u32,
    pub durability: u32,
    pub rating: f64,
    pub guarantee: u32,
}

/// Everything one template needs, and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBrief {
    Service(ServiceBrief),
    Blog(BlogBrief),
    Ecommerce(EcommerceBrief),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Templated {
    pub title: String,
    pub headings: Vec<String>,
    pub body: String,
}

fn or_default(count: usize, default: usize) -> usize {
    if count == 0 {
        default
    } else {
        count
    }
}

impl ContentBrief {
    pub fn build<R: Rng + ?Sized>(
        content_type: ContentType,
        stats: &KeywordStats,
        competitors: &CompetitorInsights,
        year: i32,
        rng: &mut R,
    ) -> Self {
        let keyword = stats.keyword.trim().to_string();
        let topics = competitors.common_topics.len();
        let related = |n: usize| stats.related_keywords.iter().take(n).cloned().collect();

        match content_type {
            ContentType::Service => ContentBrief::Service(ServiceBrief {
                keyword,
                search_volume: stats.search_volume,
                difficulty: stats.difficulty,
                related_terms: related(5),
                competitor_topics: or_default(topics, 15),
                competitor_length: competitors.average_length,
                visibility_gain: rng.gen_range(60..100),
                conversion_gain: rng.gen_range(30..80),
                cost_reduction: rng.gen_range(20..50),
            }),
            ContentType::Blog => ContentBrief::Blog(BlogBrief {
                keyword,
                search_volume: stats.search_volume,
                difficulty: stats.difficulty,
                intent: stats.intent,
                related_terms: related(6),
                competitor_topics: or_default(topics, 20),
                competitor_length: competitors.average_length,
                year,
            }),
            ContentType::Ecommerce => ContentBrief::Ecommerce(EcommerceBrief {
                keyword,
                search_volume: stats.search_volume,
                difficulty: stats.difficulty,
                cpc: stats.cpc,
                competitor_topics: or_default(topics, 25),
                year,
                satisfaction: rng.gen_range(90..100),
                performance: rng.gen_range(80..100),
                durability: rng.gen_range(85..100),
                rating: (rng.gen_range(4.0..5.0_f64) * 10.0).round() / 10.0,
                guarantee: rng.gen_range(80..100),
            }),
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentBrief::Service(_) => ContentType::Service,
            ContentBrief::Blog(_) => ContentType::Blog,
            ContentBrief::Ecommerce(_) => ContentType::Ecommerce,
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            ContentBrief::Service(b) => &b.keyword,
            ContentBrief::Blog(b) => &b.keyword,
            ContentBrief::Ecommerce(b) => &b.keyword,
        }
    }
}

pub fn render(brief: &ContentBrief) -> Templated {
    match brief {
        ContentBrief::Service(b) => render_service(b),
        ContentBrief::Blog(b) => render_blog(b),
        ContentBrief::Ecommerce(b) => render_ecommerce(b),
    }
}

fn render_service(b: &ServiceBrief) -> Templated {
    let k = &b.keyword;
    let volume = format_thousands(b.search_volume);
    let difficulty = b.difficulty;
    let experience = difficulty / 10 + 3;
    let segments = or_default(b.related_terms.len(), 5);
    let benefits: String = b
        .related_terms
        .iter()
        .map(|term| format!("- **{term}**: Advanced strategies tailored to your industry\n"))
        .collect();

    let body = format!(
        "# Professional {k} Services - Industry-Leading Solutions

## Transform Your Business with Expert {k} Solutions

With {volume} monthly searches and growing demand, {k} has become crucial for business success. \
Our team of certified experts delivers data-driven {k} solutions that consistently outperform the competition.

### Our Data-Driven {k} Approach

Based on extensive market analysis of {topics}+ competitor strategies, we have developed a proven \
methodology that delivers measurable results:

- **Comprehensive Analysis**: We analyze {length}+ data points to identify opportunities
- **Strategic Implementation**: Custom strategies based on keyword difficulty of {difficulty}/100
- **Performance Monitoring**: Real-time tracking and optimization
- **Competitive Advantage**: Stay ahead of {segments}+ related market segments

### Key Benefits of Our {k} Services

{benefits}- **ROI Optimization**: Average 3x improvement in performance metrics
- **Expert Team**: Certified professionals with {experience}+ years experience
- **Ongoing Support**: Continuous monitoring and strategic adjustments

### Proven Results That Speak for Themselves

Our clients consistently achieve:
- {visibility}% increase in organic visibility
- {conversion}% improvement in conversion rates
- {cost}% reduction in acquisition costs

### Why Choose Our {k} Services

Every engagement starts with an audit of where you stand today and a plan for where you need to be. \
We report transparently, explain every recommendation and adjust the strategy as the market moves.

### Get Started Today

Ready to transform your {k} strategy? Contact us today for a free consultation and discover how our \
proven approach can drive your business forward.",
        topics = b.competitor_topics,
        length = b.competitor_length,
        visibility = b.visibility_gain,
        conversion = b.conversion_gain,
        cost = b.cost_reduction,
    );

    Templated {
        title: format!("Professional {k} Services - {volume}+ Monthly Searches"),
        headings: vec![
            format!("Expert {k} Solutions"),
            format!("Our Data-Driven {k} Approach"),
            format!("Proven {k} Results"),
            format!("Why Choose Our {k} Services"),
            "Get Started Today".to_string(),
        ],
        body,
    }
}

fn render_blog(b: &BlogBrief) -> Templated {
    let k = &b.keyword;
    let year = b.year;
    let volume = format_thousands(b.search_volume);
    let difficulty = b.difficulty;
    let intent = b.intent;
    let components: String = b
        .related_terms
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{}. **{term}**: Essential for comprehensive implementation\n", i + 1))
        .collect();
    let techniques: String = b
        .related_terms
        .iter()
        .take(4)
        .map(|term| format!("- {term} optimization techniques\n"))
        .collect();
    let emerging = b
        .related_terms
        .first()
        .map(String::as_str)
        .unwrap_or("related technologies");

    let body = format!(
        "# {k}: The Complete Guide [{year}]

## Introduction: Why {k} Matters Now More Than Ever

With {volume} monthly searches and {intent} intent, {k} has become essential knowledge in today's \
digital landscape. This comprehensive guide covers everything you need to know, from basics to \
advanced strategies.

## What is {k}?

{k} represents a critical aspect of modern digital strategy. Based on analysis of {topics}+ industry \
sources, we define {k} as the systematic approach to optimizing performance through data-driven \
methodologies.

### Key Components of {k}:

{components}
## Getting Started with {k}

### Step 1: Understanding the Fundamentals
Before diving into advanced techniques, master these core concepts:

- **Market Analysis**: Understand the competitive landscape (difficulty: {difficulty}/100)
- **Strategic Planning**: Develop comprehensive approaches
- **Implementation**: Execute with precision and consistency

### Step 2: Developing Your {k} Strategy
Create a robust strategy that addresses:

{techniques}- Performance measurement and analytics
- Continuous improvement processes

## Advanced {k} Strategies

### Data-Driven Optimization
Leverage analytics to make informed decisions:

- Monitor {kpis}+ key performance indicators
- Implement A/B testing for continuous improvement
- Use competitive analysis for strategic advantages

### Automation and Scaling
Streamline your {k} efforts:

- Automated reporting and monitoring systems
- Scalable processes for growing businesses
- Integration with existing workflows

## Common Mistakes to Avoid

Based on analysis of {case_studies}+ case studies:

1. **Ignoring Data**: Always base decisions on solid analytics
2. **Inconsistent Implementation**: Maintain steady progress
3. **Neglecting Updates**: Stay current with industry changes
4. **Poor Planning**: Develop comprehensive strategies before execution

## The Future of {k}

Industry trends indicate {k} will continue evolving:

- Increased automation and AI integration
- Greater emphasis on personalization
- Enhanced measurement and attribution
- Growing importance of {emerging}

## Conclusion

{k} offers tremendous opportunities for those who approach it strategically. With {volume} monthly \
searches reflecting growing interest, now is the perfect time to master these concepts and implement \
them in your strategy.

Start with the fundamentals, gradually incorporate advanced techniques, and always measure your \
results. Success with {k} requires patience, consistency, and continuous learning.",
        topics = b.competitor_topics,
        kpis = b.competitor_length,
        case_studies = difficulty / 10 + 50,
    );

    Templated {
        title: format!("{k}: Complete Guide [{year}] - {volume}+ Searches/Month"),
        headings: vec![
            format!("Complete Guide to {k}"),
            format!("What is {k}?"),
            format!("Getting Started with {k}"),
            format!("Advanced {k} Strategies"),
            "Common Mistakes to Avoid".to_string(),
            format!("Future of {k}"),
            "Conclusion".to_string(),
        ],
        body,
    }
}

fn render_ecommerce(b: &EcommerceBrief) -> Templated {
    let k = &b.keyword;
    let year = b.year;
    let volume = format_thousands(b.search_volume);
    let difficulty = u32::from(b.difficulty);
    let cpc = b.cpc;
    // Whole-dollar package prices scale with the click price.
    let price = |factor: f64| (cpc * factor).floor() as u64;

    let body = format!(
        "# Premium {k} - Industry-Leading Quality

## Transform Your Experience with Our Top-Rated {k}

Chosen by {volume}+ satisfied customers, our premium {k} delivers exceptional performance and \
unmatched value. With an average CPC of ${cpc:.2}, this represents serious buyer intent and proven \
market demand.

### Why Choose Our {k}?

**Proven Performance**: Based on analysis of {topics}+ competitor products
**Quality Assurance**: Rigorous testing with {checkpoints}+ quality checkpoints
**Customer Satisfaction**: {satisfaction}% customer satisfaction rate

## Advanced Features & Technology

### Core Specifications
- **Performance Rating**: {performance}/100
- **Durability Score**: {durability}/100
- **User Rating**: {rating:.1}/5.0 stars
- **Compatibility**: Works with {systems}+ system types

### Technical Excellence
Our {k} incorporates cutting-edge technology:

- Advanced processing capabilities
- Optimized performance algorithms
- Seamless integration features
- Future-proof design architecture

## Customer Reviews & Testimonials

**★★★★★ \"Exceeded Expectations\"**
*\"This {k} has transformed our workflow. The quality is outstanding and performance is exactly as \
advertised.\"* - Verified Customer

**★★★★★ \"Best Investment This Year\"**
*\"After trying {alternatives}+ alternatives, this is by far the best {k} solution available.\"* - \
Industry Professional

**★★★★★ \"Highly Recommend\"**
*\"The support team is amazing and the product delivers on every promise. Worth every penny.\"* - \
Business Owner

## Pricing & Value Guarantee

### Investment Options:
- **Standard Package**: ${standard} - Perfect for individuals
- **Professional Package**: ${professional} - Ideal for small businesses
- **Enterprise Package**: ${enterprise} - Complete solution for large organizations

### Our Guarantee:
- 30-day money-back guarantee
- Free support and updates
- Lifetime warranty on core components
- {guarantee}% satisfaction guarantee

## Order Today - Limited Time Offer

With {volume} monthly searches and growing demand, secure your {k} today. Free shipping, immediate \
delivery, and expert setup support included.

**Special Bonus**: Order within 24 hours and receive {bonus}% additional value in premium accessories.

*Ready to experience the difference? Order your {k} now.*",
        topics = b.competitor_topics,
        checkpoints = difficulty / 5 + 10,
        satisfaction = b.satisfaction,
        performance = b.performance,
        durability = b.durability,
        rating = b.rating,
        systems = difficulty / 20 + 3,
        alternatives = difficulty / 30 + 2,
        standard = price(50.0),
        professional = price(85.0),
        enterprise = price(120.0),
        guarantee = b.guarantee,
        bonus = price(10.0),
    );

    Templated {
        title: format!("Premium {k} - Best Value {year} [{volume}+ Reviews]"),
        headings: vec![
            format!("Premium {k} Collection"),
            "Product Features".to_string(),
            "Technical Specifications".to_string(),
            "Customer Reviews".to_string(),
            "Pricing & Guarantee".to_string(),
            "Order Information".to_string(),
        ],
        body,
    }
}

/// Minimal content used when a template produces nothing usable.
pub fn fallback_content(stats: &KeywordStats, content_type: ContentType) -> Templated {
    let k = stats.keyword.trim();
    Templated {
        title: format!("{k} - Comprehensive {content_type} Guide"),
        headings: vec![
            format!("{k} Overview"),
            "Key Benefits".to_string(),
            "Implementation".to_string(),
            "Results".to_string(),
        ],
        body: format!(
            "# {k}\n\nComprehensive information about {k} with search volume of {} and difficulty {}/100.",
            stats.search_volume, stats.difficulty
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::{rngs::StdRng, SeedableRng};

    fn stats(keyword: &str) -> KeywordStats {
        KeywordStats {
            related_keywords: vec![
                "best coffee makers guide".to_string(),
                "top coffee makers".to_string(),
            ],
            ..KeywordStats::new(keyword)
        }
    }

    fn brief(content_type: ContentType, keyword: &str) -> ContentBrief {
        ContentBrief::build(
            content_type,
            &stats(keyword),
            &CompetitorInsights::default(),
            2025,
            &mut StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn test_every_type_interpolates_keyword() {
        for content_type in [ContentType::Service, ContentType::Blog, ContentType::Ecommerce] {
            let brief = brief(content_type, "coffee makers");
            assert_eq!(brief.content_type(), content_type);
            assert_eq!(brief.keyword(), "coffee makers");
            let out = render(&brief);
            assert!(out.title.contains("coffee makers"), "{content_type}: {}", out.title);
            assert!(out.body.contains("coffee makers"));
            assert!(out.headings.len() >= 5);
        }
    }

    #[test]
    fn test_ecommerce_title_and_headings() {
        let out = render(&brief(ContentType::Ecommerce, "best coffee makers"));
        assert_eq!(out.title, "Premium best coffee makers - Best Value 2025 [1,000+ Reviews]");
        assert_eq!(out.headings.len(), 6);
        assert_eq!(out.headings[0], "Premium best coffee makers Collection");
        // cpc 2.50 → 125 / 212 / 300
        assert!(out.body.contains("**Standard Package**: $125"));
        assert!(out.body.contains("**Enterprise Package**: $300"));
    }

    #[test]
    fn test_blog_lists_related_terms() {
        let out = render(&brief(ContentType::Blog, "coffee makers"));
        assert!(out.body.contains("1. **best coffee makers guide**"));
        assert!(out.body.contains("- top coffee makers optimization techniques"));
        assert!(out.body.contains("Growing importance of best coffee makers guide"));
        assert_eq!(out.headings.last().map(String::as_str), Some("Conclusion"));
    }

    #[test]
    fn test_competitor_defaults_when_no_topics() {
        let ContentBrief::Service(service) = brief(ContentType::Service, "seo audit") else {
            panic!("expected service brief");
        };
        assert_eq!(service.competitor_topics, 15);
        assert_eq!(service.competitor_length, 1500);
    }

    #[test]
    fn test_render_is_pure_given_brief() {
        let b = brief(ContentType::Ecommerce, "espresso machine");
        assert_eq!(render(&b), render(&b));
    }

    #[test]
    fn test_flavour_figures_stay_in_range() {
        let brief = ContentBrief::build(
            ContentType::Ecommerce,
            &stats("grinder"),
            &CompetitorInsights::default(),
            2025,
            &mut StepRng::new(0, 0),
        );
        let ContentBrief::Ecommerce(e) = brief else {
            panic!("expected ecommerce brief");
        };
        assert_eq!(e.satisfaction, 90);
        assert_eq!(e.rating, 4.0);
    }

    #[test]
    fn test_fallback_content() {
        let out = fallback_content(&KeywordStats::new("cold brew"), ContentType::Blog);
        assert_eq!(out.title, "cold brew - Comprehensive blog Guide");
        assert_eq!(out.headings.len(), 4);
        assert!(out.body.starts_with("# cold brew"));
    }
}
