// Built-in rule table: the default detection catalog.
//
// Each entry is (pattern, category, severity, description, confidence).
// Patterns are compiled case-insensitively by RuleCatalog::compile, so they
// are written in lower case. Declaration order is the diagnostic numbering
// order in debug traces; it has no effect on the verdict.
//
// Slur patterns are written as character-class obfuscation matchers rather
// than literal terms.

use super::rules::RuleSpec;
use super::taxonomy::{Category, Severity};

use Category::*;
use Severity::*;

pub static BUILTIN_RULES: &[RuleSpec] = &[
    // Direct hate and threats
    RuleSpec::new(
        r"\b(hate|despise|detest|loathe)\s+(all|those|these|every|you)\s+\w+",
        Hate,
        High,
        "General hate expression",
        0.85,
    ),
    RuleSpec::new(
        r"\b(kill|murder|eliminate|execute|exterminate)\s+(all|those|these|every)\s+\w+",
        Threat,
        Critical,
        "Violent threat against groups",
        0.95,
    ),
    RuleSpec::new(
        r"\byou\s+(should|deserve to|need to|ought to)\s+(die|disappear|leave|burn|suffer)",
        Threat,
        High,
        "Personal threat",
        0.90,
    ),
    RuleSpec::new(
        r"\b(kill|hurt|harm|beat|attack)\s+(yourself|urself)",
        Threat,
        Critical,
        "Self-harm encouragement",
        0.95,
    ),
    RuleSpec::new(
        r"\bcommit\s+suicide\b",
        Threat,
        Critical,
        "Suicide encouragement",
        0.90,
    ),
    RuleSpec::new(
        r"\bend\s+your\s+life\b",
        Threat,
        Critical,
        "Suicide encouragement",
        0.85,
    ),
    // Discrimination and dehumanization
    RuleSpec::new(
        r"\b(inferior|subhuman|worthless|animals|vermin|parasites)\s+(race|people|group|beings)",
        Discrimination,
        High,
        "Dehumanizing language",
        0.85,
    ),
    RuleSpec::new(
        r"\b(go back to|don't belong|not welcome|not wanted|get out)",
        Discrimination,
        Medium,
        "Exclusionary language",
        0.65,
    ),
    RuleSpec::new(
        r"\b(pure|master|superior)\s+(race|blood|breeding|genes)",
        Discrimination,
        Critical,
        "Supremacist language",
        0.90,
    ),
    RuleSpec::new(
        r"\b(ethnic|racial)\s+(cleansing|purification|removal)",
        Discrimination,
        Critical,
        "Genocide language",
        0.95,
    ),
    RuleSpec::new(
        r"\bfinal\s+solution\b",
        Discrimination,
        Critical,
        "Nazi reference",
        0.95,
    ),
    // Slurs
    RuleSpec::new(
        r"\b\w*[n][1!i][g9]{2}[ae3@][hr]*\w*\b",
        Slur,
        Critical,
        "Racial slur",
        0.95,
    ),
    RuleSpec::new(
        r"\b[f][a4@][g9]{1,2}[o0@][t7]?[s5$]?\b",
        Slur,
        High,
        "Homophobic slur",
        0.90,
    ),
    RuleSpec::new(
        r"\b[r][e3][t7][a4@][r][d]([e3][d]|[s5$])?\b",
        Slur,
        High,
        "Ableist slur",
        0.85,
    ),
    RuleSpec::new(
        r"\b\w*[t7][a4@][r][d]\b",
        Slur,
        Medium,
        "Ableist suffix",
        0.70,
    ),
    RuleSpec::new(
        r"\b[t7]r[a4@]nn(y|ie|ies)\b",
        Slur,
        High,
        "Transphobic slur",
        0.85,
    ),
    RuleSpec::new(r"\b[k][i1!][k3][e3]\b", Slur, Critical, "Ethnic slur", 0.90),
    RuleSpec::new(r"\b[s5$][p][i1!][c][k3]?\b", Slur, Medium, "Ethnic slur", 0.75),
    // Harassment and personal attacks
    RuleSpec::new(
        r"\b(ugly|stupid|worthless|pathetic|disgusting|repulsive)\s+(piece of|excuse for|waste of)",
        Harassment,
        Medium,
        "Personal attack",
        0.75,
    ),
    RuleSpec::new(
        r"\byou\s+(suck|blow|are\s+(garbage|trash|shit|crap))",
        Harassment,
        Medium,
        "Personal insult",
        0.70,
    ),
    RuleSpec::new(
        r"\b(shut up|stfu|fuck off|piss off|go away)\s+(bitch|whore|slut|cunt)",
        Harassment,
        High,
        "Gendered harassment",
        0.85,
    ),
    RuleSpec::new(
        r"\b(dumb|stupid|retarded)\s+(bitch|whore|slut|cunt|hoe)",
        Harassment,
        High,
        "Misogynistic abuse",
        0.85,
    ),
    RuleSpec::new(
        r"\byour\s+(mom|mother|family)\s+(is|are)\s+(dead|gonna die|should die)",
        Threat,
        High,
        "Family threat",
        0.80,
    ),
    // Sexual harassment
    RuleSpec::new(
        r"\b(send|show|post)\s+(nudes|nude pics|naked pics)",
        Harassment,
        Medium,
        "Sexual harassment",
        0.75,
    ),
    RuleSpec::new(
        r"\bi\s+(want to|gonna|will)\s+(rape|molest|assault)\s+you",
        Threat,
        Critical,
        "Sexual threat",
        0.95,
    ),
    RuleSpec::new(
        r"\bsuck\s+my\s+(dick|cock|penis)",
        Harassment,
        Medium,
        "Sexual harassment",
        0.70,
    ),
    // Violence
    RuleSpec::new(
        r"\bi\s+(will|gonna|am going to)\s+(kill|murder|hurt|beat|stab|shoot)\s+you",
        Threat,
        Critical,
        "Direct threat",
        0.95,
    ),
    RuleSpec::new(
        r"\bi\s+know\s+where\s+you\s+live",
        Threat,
        High,
        "Stalking threat",
        0.85,
    ),
    RuleSpec::new(
        r"\bwatch\s+your\s+back\b",
        Threat,
        Medium,
        "Implicit threat",
        0.65,
    ),
    RuleSpec::new(
        r"\byou(r|re)\s+(gonna|going to)\s+(get|be)\s+(hurt|killed|beaten|shot|stabbed)",
        Threat,
        High,
        "Threat prediction",
        0.80,
    ),
    // Extremist and terrorist content
    RuleSpec::new(
        r"\b(bomb|explosive|jihad|terrorist|attack)\s+(plan|making|building|preparation)",
        Threat,
        Critical,
        "Terrorist content",
        0.95,
    ),
    RuleSpec::new(
        r"\b(white|aryan)\s+(power|pride|nation|brotherhood)",
        Hate,
        Critical,
        "White supremacy",
        0.90,
    ),
    RuleSpec::new(
        r"\b(heil|sieg)\s+(hitler|heil)\b",
        Hate,
        Critical,
        "Nazi salute",
        0.95,
    ),
    RuleSpec::new(r"\b14\s*/?\s*88\b", Hate, Critical, "Nazi code", 0.90),
    // Profanity
    RuleSpec::new(
        r"\bf+u+c+k+(ing?|ed|er|s)?\b",
        Profanity,
        Low,
        "Strong profanity",
        0.60,
    ),
    RuleSpec::new(
        r"\bs+h+i+t+(s|ty|tier)?\b",
        Profanity,
        Low,
        "Mild profanity",
        0.50,
    ),
    RuleSpec::new(
        r"\bb+i+t+c+h+(es|y)?\b",
        Profanity,
        Low,
        "Gendered profanity",
        0.65,
    ),
    RuleSpec::new(
        r"\ba+s+s+(hole|hat)?\b",
        Profanity,
        Low,
        "Mild profanity",
        0.55,
    ),
    RuleSpec::new(
        r"\bd+a+m+n+(ed|it)?\b",
        Profanity,
        Low,
        "Mild profanity",
        0.40,
    ),
    RuleSpec::new(r"\bc+u+n+t+s?\b", Slur, Medium, "Gendered slur", 0.80),
    RuleSpec::new(r"\bw+h+o+r+e+s?\b", Slur, Medium, "Gendered slur", 0.75),
    RuleSpec::new(r"\bs+l+u+t+s?\b", Slur, Medium, "Gendered slur", 0.75),
    // Symbol-substituted profanity
    RuleSpec::new(
        r#"\bf[u@!*#$%^&*()_+\-=\[\]{}|;':"\\,.<>?]*[ck@*#$%^&*()_+\-=\[\]{}|;':"\\,.<>?]k"#,
        Profanity,
        Low,
        "Obfuscated profanity",
        0.70,
    ),
    RuleSpec::new(
        r#"\bs[h@*#$%^&*()_+\-=\[\]{}|;':"\\,.<>?!]*[i1!@*#$%^&*()_+\-=\[\]{}|;':"\\,.<>?]*t"#,
        Profanity,
        Low,
        "Obfuscated profanity",
        0.65,
    ),
    // Extremist organizations
    RuleSpec::new(
        r"\b(kkk|ku klux klan|white knights)\b",
        Hate,
        Critical,
        "Hate group reference",
        0.95,
    ),
    RuleSpec::new(
        r"\b(nazi|fascist|hitler)\s+(party|ideology|beliefs)",
        Hate,
        Critical,
        "Nazi ideology",
        0.90,
    ),
    RuleSpec::new(
        r"\b(isis|isil|al.?qaeda|taliban)\s+(supporter|member|fighter)",
        Hate,
        Critical,
        "Terrorist affiliation",
        0.95,
    ),
    // Group generalizations
    RuleSpec::new(
        r"\ball\s+(jews|muslims|christians|blacks|whites|asians|latinos|hispanics)\s+are\s+(bad|evil|terrorists|criminals)",
        Discrimination,
        High,
        "Group generalization",
        0.85,
    ),
    RuleSpec::new(
        r"\b(jews|muslims|christians|gays|trans|women|men)\s+(control|run|own)\s+the\s+world",
        Discrimination,
        Medium,
        "Conspiracy theory",
        0.70,
    ),
    // Appearance-based harassment
    RuleSpec::new(
        r"\byou\s+are\s+(so|really|extremely)?\s*(fat|ugly|gross|disgusting|hideous)",
        Harassment,
        Medium,
        "Body shaming",
        0.75,
    ),
    RuleSpec::new(
        r"\b(fat|ugly|gross)\s+(pig|cow|whale|monster)",
        Harassment,
        High,
        "Dehumanizing body shaming",
        0.80,
    ),
    // Mental health stigma
    RuleSpec::new(
        r"\byou\s+are\s+(crazy|insane|mental|psycho|nuts)",
        Harassment,
        Medium,
        "Mental health stigma",
        0.70,
    ),
    RuleSpec::new(
        r"\bget\s+(help|therapy|medication)\s+you\s+(psycho|nutjob|lunatic)",
        Harassment,
        Medium,
        "Mental health abuse",
        0.75,
    ),
];
