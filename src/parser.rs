use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("field `{name}`: expected {expected}, found {found}")]
    FieldType { name: &'static str, expected: &'static str, found: &'static str },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unquoted literal `{0}` is not numeric")]
    NotNumeric(String),
    #[error("malformed value list")]
    Malformed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub imdb_id: String,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: String,
    pub genres: String,
    pub runtime: i32,
    pub country: String,
    pub language: String,
    pub imdb_score: f64,
    pub imdb_votes: i64,
    pub metacritic_score: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActorRecord {
    pub id: i64,
    pub movie_id: i64,
    pub imdb_id: String,
    pub name: String,
}

/// One literal from a statement's value list. Quoted text is taken verbatim,
/// without escape processing; bare tokens must be numeric.
#[derive(Clone, Debug, PartialEq)]
enum Literal {
    Int(i64),
    Real(f64),
    Text(String),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "integer",
            Literal::Real(_) => "real",
            Literal::Text(_) => "string",
        }
    }
}

fn int(lit: Literal, name: &'static str) -> Result<i64, ParseError> {
    match lit {
        Literal::Int(v) => Ok(v),
        other => Err(ParseError::FieldType { name, expected: "integer", found: other.kind() }),
    }
}

// Integer literals are acceptable where a real is expected, e.g. a score of 80.
fn real(lit: Literal, name: &'static str) -> Result<f64, ParseError> {
    match lit {
        Literal::Int(v) => Ok(v as f64),
        Literal::Real(v) => Ok(v),
        other => Err(ParseError::FieldType { name, expected: "real", found: other.kind() }),
    }
}

fn text(lit: Literal, name: &'static str) -> Result<String, ParseError> {
    match lit {
        Literal::Text(s) => Ok(s),
        other => Err(ParseError::FieldType { name, expected: "string", found: other.kind() }),
    }
}

impl MovieRecord {
    fn from_values(values: Vec<Literal>) -> Result<Self, ParseError> {
        let fields: [Literal; 13] = values
            .try_into()
            .map_err(|v: Vec<Literal>| ParseError::FieldCount { expected: 13, found: v.len() })?;
        let [
            id,
            imdb_id,
            title,
            director,
            year,
            rating,
            genres,
            runtime,
            country,
            language,
            imdb_score,
            imdb_votes,
            metacritic_score,
        ] = fields;

        Ok(Self {
            id: int(id, "id")?,
            imdb_id: text(imdb_id, "imdb_id")?,
            title: text(title, "title")?,
            director: text(director, "director")?,
            year: int(year, "year")? as i32,
            rating: text(rating, "rating")?,
            genres: text(genres, "genres")?,
            runtime: int(runtime, "runtime")? as i32,
            country: text(country, "country")?,
            language: text(language, "language")?,
            imdb_score: real(imdb_score, "imdb_score")?,
            imdb_votes: int(imdb_votes, "imdb_votes")?,
            metacritic_score: real(metacritic_score, "metacritic_score")?,
        })
    }
}

impl ActorRecord {
    fn from_values(values: Vec<Literal>) -> Result<Self, ParseError> {
        let fields: [Literal; 4] = values
            .try_into()
            .map_err(|v: Vec<Literal>| ParseError::FieldCount { expected: 4, found: v.len() })?;
        let [id, movie_id, imdb_id, name] = fields;

        Ok(Self {
            id: int(id, "id")?,
            movie_id: int(movie_id, "movie_id")?,
            imdb_id: text(imdb_id, "imdb_id")?,
            name: text(name, "name")?,
        })
    }
}

/// Scans a dump for `INSERT INTO <table> VALUES(...)` statements and yields
/// one value list per candidate. Statements whose value list does not
/// tokenize yield an error and scanning resumes at the next candidate.
struct Statements<'a> {
    src: &'a str,
    prefix: String,
    pos: usize,
}

impl<'a> Statements<'a> {
    fn new(src: &'a str, table: &str) -> Self {
        Self { src, prefix: format!("INSERT INTO {table} VALUES("), pos: 0 }
    }

    fn read_values(&self, mut pos: usize) -> Result<(Vec<Literal>, usize), ParseError> {
        let bytes = self.src.as_bytes();
        let mut out = Vec::new();

        loop {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos) {
                None => return Err(ParseError::Malformed),
                Some(b')') if out.is_empty() => return Ok((out, pos + 1)),
                Some(b'\'') => {
                    let body = &self.src[pos + 1..];
                    let Some(close) = body.find('\'') else {
                        return Err(ParseError::UnterminatedString);
                    };
                    out.push(Literal::Text(body[..close].to_string()));
                    pos += close + 2;
                },
                Some(_) => {
                    let rest = &self.src[pos..];
                    let end = rest.find([',', ')']).ok_or(ParseError::Malformed)?;
                    let token = rest[..end].trim();
                    let lit = if let Ok(v) = token.parse::<i64>() {
                        Literal::Int(v)
                    } else if let Ok(v) = token.parse::<f64>() {
                        Literal::Real(v)
                    } else {
                        return Err(ParseError::NotNumeric(token.to_string()));
                    };
                    out.push(lit);
                    pos += end;
                },
            }

            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos) {
                Some(b',') => pos += 1,
                Some(b')') => return Ok((out, pos + 1)),
                _ => return Err(ParseError::Malformed),
            }
        }
    }
}

impl Iterator for Statements<'_> {
    type Item = Result<Vec<Literal>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.src[self.pos..].find(&self.prefix)?;
        let body_start = self.pos + offset + self.prefix.len();
        // On failure leave the cursor past the prefix so the scan resumes at
        // the next candidate statement.
        self.pos = body_start;

        match self.read_values(body_start) {
            Ok((values, end)) => {
                self.pos = end;
                Some(Ok(values))
            },
            Err(err) => Some(Err(err)),
        }
    }
}

pub fn movie_statements(src: &str) -> impl Iterator<Item = Result<MovieRecord, ParseError>> + '_ {
    Statements::new(src, "movies").map(|values| values.and_then(MovieRecord::from_values))
}

pub fn actor_statements(src: &str) -> impl Iterator<Item = Result<ActorRecord, ParseError>> + '_ {
    Statements::new(src, "actors").map(|values| values.and_then(ActorRecord::from_values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE: &str = "INSERT INTO movies VALUES(1,'tt0468569','The Dark Knight','Christopher Nolan',2008,'PG-13','Action|Crime|Drama',152,'USA','English',9.0,2700000,84.0);";

    #[test]
    fn parses_movie_statement() {
        let records: Vec<_> = movie_statements(MOVIE).collect();
        assert_eq!(records.len(), 1);
        let movie = records[0].as_ref().unwrap();
        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "The Dark Knight");
        assert_eq!(movie.director, "Christopher Nolan");
        assert_eq!(movie.year, 2008);
        assert_eq!(movie.rating, "PG-13");
        assert_eq!(movie.runtime, 152);
        assert_eq!(movie.imdb_score, 9.0);
        assert_eq!(movie.imdb_votes, 2_700_000);
        assert_eq!(movie.metacritic_score, 84.0);
    }

    #[test]
    fn parses_actor_statement() {
        let src = "INSERT INTO actors VALUES(7,1,'nm0000288','Christian Bale');";
        let actor = actor_statements(src).next().unwrap().unwrap();
        assert_eq!(
            actor,
            ActorRecord {
                id: 7,
                movie_id: 1,
                imdb_id: "nm0000288".to_string(),
                name: "Christian Bale".to_string(),
            }
        );
    }

    #[test]
    fn integer_accepted_for_real_field() {
        let src = MOVIE.replace("84.0", "84");
        let movie = movie_statements(&src).next().unwrap().unwrap();
        assert_eq!(movie.metacritic_score, 84.0);
    }

    #[test]
    fn empty_string_literal_allowed() {
        let src = MOVIE.replace("'Christopher Nolan'", "''");
        let movie = movie_statements(&src).next().unwrap().unwrap();
        assert_eq!(movie.director, "");
    }

    #[test]
    fn tolerates_whitespace_between_fields() {
        let src = "INSERT INTO actors VALUES( 7 , 1 ,'nm0000288' , 'Christian Bale' );";
        let actor = actor_statements(src).next().unwrap().unwrap();
        assert_eq!(actor.id, 7);
        assert_eq!(actor.name, "Christian Bale");
    }

    #[test]
    fn wrong_field_count_is_typed_failure() {
        let src = "INSERT INTO actors VALUES(7,1,'nm0000288');";
        let result = actor_statements(src).next().unwrap();
        assert_eq!(result, Err(ParseError::FieldCount { expected: 4, found: 3 }));
    }

    #[test]
    fn non_numeric_bare_token_is_typed_failure() {
        let src = "INSERT INTO actors VALUES(7,oops,'nm0000288','Christian Bale');";
        let result = actor_statements(src).next().unwrap();
        assert_eq!(result, Err(ParseError::NotNumeric("oops".to_string())));
    }

    #[test]
    fn quoted_text_where_integer_expected_is_typed_failure() {
        let src = "INSERT INTO actors VALUES('x',1,'nm0000288','Christian Bale');";
        let result = actor_statements(src).next().unwrap();
        assert_eq!(
            result,
            Err(ParseError::FieldType { name: "id", expected: "integer", found: "string" })
        );
    }

    #[test]
    fn malformed_statement_does_not_stop_the_scan() {
        let src = format!(
            "INSERT INTO movies VALUES(borked;\n{}\n",
            MOVIE.replace("VALUES(1,'tt0468569'", "VALUES(2,'tt1375666'")
        );
        let results: Vec<_> = movie_statements(&src).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().id, 2);
    }

    #[test]
    fn ignores_statements_for_other_tables() {
        let src = format!("INSERT INTO actors VALUES(7,1,'nm0000288','Christian Bale');\n{MOVIE}");
        assert_eq!(movie_statements(&src).count(), 1);
        assert_eq!(actor_statements(&src).count(), 1);
    }

    #[test]
    fn scan_is_lazy() {
        let src = MOVIE.repeat(1000);
        let mut stmts = movie_statements(&src);
        assert!(stmts.next().unwrap().is_ok());
    }
}
