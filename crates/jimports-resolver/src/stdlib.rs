//! Compile-time standard-library index.
//!
//! Maps class simple names to the packages that provide them. The table
//! covers the packages an average Java file actually imports from; it is
//! not an exhaustive JDK mirror. `java.lang` types are listed separately:
//! they are visible without an import and must never produce one.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use jimports_core::{Candidate, Candidates, Identifier, Import, Selector, Source};

use crate::registry::CandidateProvider;

/// Types visible in every compilation unit without an import.
const JAVA_LANG: &[&str] = &[
    "AbstractMethodError",
    "Appendable",
    "ArithmeticException",
    "ArrayIndexOutOfBoundsException",
    "ArrayStoreException",
    "AssertionError",
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "ClassLoader",
    "ClassNotFoundException",
    "CloneNotSupportedException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalAccessException",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "InstantiationException",
    "Integer",
    "InterruptedException",
    "Iterable",
    "Long",
    "Math",
    "NegativeArraySizeException",
    "NoSuchFieldException",
    "NoSuchMethodException",
    "NullPointerException",
    "Number",
    "NumberFormatException",
    "Object",
    "OutOfMemoryError",
    "Override",
    "Package",
    "Process",
    "ProcessBuilder",
    "Readable",
    "Record",
    "ReflectiveOperationException",
    "Runnable",
    "Runtime",
    "RuntimeException",
    "SafeVarargs",
    "SecurityException",
    "Short",
    "StackOverflowError",
    "StackTraceElement",
    "StrictMath",
    "String",
    "StringBuffer",
    "StringBuilder",
    "StringIndexOutOfBoundsException",
    "SuppressWarnings",
    "System",
    "Thread",
    "ThreadLocal",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// `(simple name, package, is_static)` entries of the bundled index.
const STDLIB_CLASSES: &[(&str, &str, bool)] = &[
    // java.util
    ("AbstractCollection", "java.util", false),
    ("AbstractList", "java.util", false),
    ("AbstractMap", "java.util", false),
    ("AbstractSet", "java.util", false),
    ("ArrayDeque", "java.util", false),
    ("ArrayList", "java.util", false),
    ("Arrays", "java.util", false),
    ("BitSet", "java.util", false),
    ("Calendar", "java.util", false),
    ("Collection", "java.util", false),
    ("Collections", "java.util", false),
    ("Comparator", "java.util", false),
    ("ConcurrentModificationException", "java.util", false),
    ("Date", "java.util", false),
    ("Deque", "java.util", false),
    ("EnumMap", "java.util", false),
    ("EnumSet", "java.util", false),
    ("HashMap", "java.util", false),
    ("HashSet", "java.util", false),
    ("Hashtable", "java.util", false),
    ("IdentityHashMap", "java.util", false),
    ("Iterator", "java.util", false),
    ("LinkedHashMap", "java.util", false),
    ("LinkedHashSet", "java.util", false),
    ("LinkedList", "java.util", false),
    ("List", "java.util", false),
    ("ListIterator", "java.util", false),
    ("Locale", "java.util", false),
    ("Map", "java.util", false),
    ("MissingResourceException", "java.util", false),
    ("NavigableMap", "java.util", false),
    ("NavigableSet", "java.util", false),
    ("NoSuchElementException", "java.util", false),
    ("Objects", "java.util", false),
    ("Optional", "java.util", false),
    ("OptionalDouble", "java.util", false),
    ("OptionalInt", "java.util", false),
    ("OptionalLong", "java.util", false),
    ("PriorityQueue", "java.util", false),
    ("Properties", "java.util", false),
    ("Queue", "java.util", false),
    ("Random", "java.util", false),
    ("ResourceBundle", "java.util", false),
    ("Scanner", "java.util", false),
    ("Set", "java.util", false),
    ("SortedMap", "java.util", false),
    ("SortedSet", "java.util", false),
    ("Spliterator", "java.util", false),
    ("Stack", "java.util", false),
    ("StringJoiner", "java.util", false),
    ("StringTokenizer", "java.util", false),
    ("Timer", "java.util", false),
    ("TimerTask", "java.util", false),
    ("TimeZone", "java.util", false),
    ("TreeMap", "java.util", false),
    ("TreeSet", "java.util", false),
    ("UUID", "java.util", false),
    ("Vector", "java.util", false),
    ("WeakHashMap", "java.util", false),
    // java.util.concurrent
    ("ArrayBlockingQueue", "java.util.concurrent", false),
    ("BlockingQueue", "java.util.concurrent", false),
    ("Callable", "java.util.concurrent", false),
    ("CompletableFuture", "java.util.concurrent", false),
    ("CompletionStage", "java.util.concurrent", false),
    ("ConcurrentHashMap", "java.util.concurrent", false),
    ("ConcurrentLinkedQueue", "java.util.concurrent", false),
    ("ConcurrentMap", "java.util.concurrent", false),
    ("CopyOnWriteArrayList", "java.util.concurrent", false),
    ("CountDownLatch", "java.util.concurrent", false),
    ("CyclicBarrier", "java.util.concurrent", false),
    ("ExecutionException", "java.util.concurrent", false),
    ("Executor", "java.util.concurrent", false),
    ("ExecutorService", "java.util.concurrent", false),
    ("Executors", "java.util.concurrent", false),
    ("Future", "java.util.concurrent", false),
    ("LinkedBlockingQueue", "java.util.concurrent", false),
    ("ScheduledExecutorService", "java.util.concurrent", false),
    ("Semaphore", "java.util.concurrent", false),
    ("ThreadFactory", "java.util.concurrent", false),
    ("ThreadLocalRandom", "java.util.concurrent", false),
    ("ThreadPoolExecutor", "java.util.concurrent", false),
    ("TimeUnit", "java.util.concurrent", false),
    ("TimeoutException", "java.util.concurrent", false),
    ("AtomicBoolean", "java.util.concurrent.atomic", false),
    ("AtomicInteger", "java.util.concurrent.atomic", false),
    ("AtomicLong", "java.util.concurrent.atomic", false),
    ("AtomicReference", "java.util.concurrent.atomic", false),
    ("Condition", "java.util.concurrent.locks", false),
    ("Lock", "java.util.concurrent.locks", false),
    ("ReadWriteLock", "java.util.concurrent.locks", false),
    ("ReentrantLock", "java.util.concurrent.locks", false),
    ("ReentrantReadWriteLock", "java.util.concurrent.locks", false),
    // java.util.function
    ("BiConsumer", "java.util.function", false),
    ("BiFunction", "java.util.function", false),
    ("BiPredicate", "java.util.function", false),
    ("BinaryOperator", "java.util.function", false),
    ("BooleanSupplier", "java.util.function", false),
    ("Consumer", "java.util.function", false),
    ("Function", "java.util.function", false),
    ("IntFunction", "java.util.function", false),
    ("Predicate", "java.util.function", false),
    ("Supplier", "java.util.function", false),
    ("ToDoubleFunction", "java.util.function", false),
    ("ToIntFunction", "java.util.function", false),
    ("ToLongFunction", "java.util.function", false),
    ("UnaryOperator", "java.util.function", false),
    // java.util.stream
    ("Collector", "java.util.stream", false),
    ("Collectors", "java.util.stream", false),
    ("DoubleStream", "java.util.stream", false),
    ("IntStream", "java.util.stream", false),
    ("LongStream", "java.util.stream", false),
    ("Stream", "java.util.stream", false),
    ("StreamSupport", "java.util.stream", false),
    // java.util.regex
    ("MatchResult", "java.util.regex", false),
    ("Matcher", "java.util.regex", false),
    ("Pattern", "java.util.regex", false),
    ("PatternSyntaxException", "java.util.regex", false),
    // java.util.zip / jar
    ("Deflater", "java.util.zip", false),
    ("GZIPInputStream", "java.util.zip", false),
    ("GZIPOutputStream", "java.util.zip", false),
    ("Inflater", "java.util.zip", false),
    ("ZipEntry", "java.util.zip", false),
    ("ZipFile", "java.util.zip", false),
    ("ZipInputStream", "java.util.zip", false),
    ("ZipOutputStream", "java.util.zip", false),
    ("JarEntry", "java.util.jar", false),
    ("JarFile", "java.util.jar", false),
    ("Manifest", "java.util.jar", false),
    // java.io
    ("BufferedInputStream", "java.io", false),
    ("BufferedOutputStream", "java.io", false),
    ("BufferedReader", "java.io", false),
    ("BufferedWriter", "java.io", false),
    ("ByteArrayInputStream", "java.io", false),
    ("ByteArrayOutputStream", "java.io", false),
    ("Closeable", "java.io", false),
    ("DataInputStream", "java.io", false),
    ("DataOutputStream", "java.io", false),
    ("EOFException", "java.io", false),
    ("File", "java.io", false),
    ("FileInputStream", "java.io", false),
    ("FileNotFoundException", "java.io", false),
    ("FileOutputStream", "java.io", false),
    ("FileReader", "java.io", false),
    ("FileWriter", "java.io", false),
    ("Flushable", "java.io", false),
    ("IOException", "java.io", false),
    ("InputStream", "java.io", false),
    ("InputStreamReader", "java.io", false),
    ("ObjectInputStream", "java.io", false),
    ("ObjectOutputStream", "java.io", false),
    ("OutputStream", "java.io", false),
    ("OutputStreamWriter", "java.io", false),
    ("PrintStream", "java.io", false),
    ("PrintWriter", "java.io", false),
    ("RandomAccessFile", "java.io", false),
    ("Reader", "java.io", false),
    ("Serializable", "java.io", false),
    ("StringReader", "java.io", false),
    ("StringWriter", "java.io", false),
    ("UncheckedIOException", "java.io", false),
    ("Writer", "java.io", false),
    // java.nio
    ("ByteBuffer", "java.nio", false),
    ("CharBuffer", "java.nio", false),
    ("MappedByteBuffer", "java.nio", false),
    ("Charset", "java.nio.charset", false),
    ("StandardCharsets", "java.nio.charset", false),
    ("DirectoryStream", "java.nio.file", false),
    ("FileSystem", "java.nio.file", false),
    ("FileSystems", "java.nio.file", false),
    ("FileVisitResult", "java.nio.file", false),
    ("Files", "java.nio.file", false),
    ("NoSuchFileException", "java.nio.file", false),
    ("Path", "java.nio.file", false),
    ("Paths", "java.nio.file", false),
    ("StandardCopyOption", "java.nio.file", false),
    ("StandardOpenOption", "java.nio.file", false),
    ("WatchService", "java.nio.file", false),
    ("BasicFileAttributes", "java.nio.file.attribute", false),
    ("PosixFilePermission", "java.nio.file.attribute", false),
    // java.net
    ("DatagramSocket", "java.net", false),
    ("HttpURLConnection", "java.net", false),
    ("InetAddress", "java.net", false),
    ("InetSocketAddress", "java.net", false),
    ("MalformedURLException", "java.net", false),
    ("ServerSocket", "java.net", false),
    ("Socket", "java.net", false),
    ("SocketException", "java.net", false),
    ("SocketTimeoutException", "java.net", false),
    ("URI", "java.net", false),
    ("URISyntaxException", "java.net", false),
    ("URL", "java.net", false),
    ("URLConnection", "java.net", false),
    ("UnknownHostException", "java.net", false),
    // java.time
    ("Clock", "java.time", false),
    ("DayOfWeek", "java.time", false),
    ("Duration", "java.time", false),
    ("Instant", "java.time", false),
    ("LocalDate", "java.time", false),
    ("LocalDateTime", "java.time", false),
    ("LocalTime", "java.time", false),
    ("Month", "java.time", false),
    ("MonthDay", "java.time", false),
    ("OffsetDateTime", "java.time", false),
    ("Period", "java.time", false),
    ("Year", "java.time", false),
    ("YearMonth", "java.time", false),
    ("ZoneId", "java.time", false),
    ("ZoneOffset", "java.time", false),
    ("ZonedDateTime", "java.time", false),
    ("DateTimeFormatter", "java.time.format", false),
    ("DateTimeParseException", "java.time.format", false),
    ("ChronoUnit", "java.time.temporal", false),
    ("TemporalAdjusters", "java.time.temporal", false),
    // java.math
    ("BigDecimal", "java.math", false),
    ("BigInteger", "java.math", false),
    ("MathContext", "java.math", false),
    ("RoundingMode", "java.math", false),
    // java.text
    ("Collator", "java.text", false),
    ("DateFormat", "java.text", false),
    ("DecimalFormat", "java.text", false),
    ("MessageFormat", "java.text", false),
    ("NumberFormat", "java.text", false),
    ("ParseException", "java.text", false),
    ("SimpleDateFormat", "java.text", false),
    // java.sql
    ("CallableStatement", "java.sql", false),
    ("Connection", "java.sql", false),
    ("Date", "java.sql", false),
    ("DriverManager", "java.sql", false),
    ("PreparedStatement", "java.sql", false),
    ("ResultSet", "java.sql", false),
    ("SQLException", "java.sql", false),
    ("Statement", "java.sql", false),
    ("Time", "java.sql", false),
    ("Timestamp", "java.sql", false),
    // java.lang.annotation
    ("Documented", "java.lang.annotation", false),
    ("ElementType", "java.lang.annotation", false),
    ("Inherited", "java.lang.annotation", false),
    ("Retention", "java.lang.annotation", false),
    ("RetentionPolicy", "java.lang.annotation", false),
    ("Target", "java.lang.annotation", false),
    // java.lang.reflect
    ("Array", "java.lang.reflect", false),
    ("Constructor", "java.lang.reflect", false),
    ("Field", "java.lang.reflect", false),
    ("InvocationTargetException", "java.lang.reflect", false),
    ("Method", "java.lang.reflect", false),
    ("Modifier", "java.lang.reflect", false),
    ("Proxy", "java.lang.reflect", false),
    // java.security
    ("MessageDigest", "java.security", false),
    ("NoSuchAlgorithmException", "java.security", false),
    ("SecureRandom", "java.security", false),
    // java.awt
    ("Button", "java.awt", false),
    ("Canvas", "java.awt", false),
    ("Color", "java.awt", false),
    ("Component", "java.awt", false),
    ("Container", "java.awt", false),
    ("Dimension", "java.awt", false),
    ("Font", "java.awt", false),
    ("Frame", "java.awt", false),
    ("Graphics", "java.awt", false),
    ("Image", "java.awt", false),
    ("Insets", "java.awt", false),
    ("Label", "java.awt", false),
    ("List", "java.awt", false),
    ("Panel", "java.awt", false),
    ("Point", "java.awt", false),
    ("Rectangle", "java.awt", false),
    ("Toolkit", "java.awt", false),
    ("Window", "java.awt", false),
];

fn java_lang() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| JAVA_LANG.iter().copied().collect())
}

fn by_simple_name() -> &'static HashMap<&'static str, Vec<(&'static str, bool)>> {
    static INDEX: OnceLock<HashMap<&'static str, Vec<(&'static str, bool)>>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index: HashMap<&str, Vec<(&str, bool)>> = HashMap::new();
        for &(name, package, is_static) in STDLIB_CLASSES {
            index.entry(name).or_default().push((package, is_static));
        }
        index
    })
}

/// Whether `identifier` names a `java.lang` type: resolvable without any
/// import.
pub fn is_java_lang(identifier: &Identifier) -> bool {
    java_lang().contains(identifier.as_str())
}

/// Candidate provider backed by the bundled index.
#[derive(Debug, Default)]
pub struct StdlibProvider;

impl StdlibProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateProvider for StdlibProvider {
    fn find(&self, identifiers: &[Identifier]) -> Candidates {
        let index = by_simple_name();
        let mut candidates = Candidates::new();
        for identifier in identifiers {
            let Some(entries) = index.get(identifier.as_str()) else {
                continue;
            };
            for &(package, is_static) in entries {
                let selector = Selector::parse(package)
                    .expect("stdlib packages are valid selectors")
                    .join(identifier.clone());
                let import = if is_static {
                    Import::new_static(selector)
                } else {
                    Import::new(selector)
                };
                candidates.add(
                    identifier.clone(),
                    Candidate::new(import, Source::Stdlib),
                );
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_ambiguous_between_util_and_awt() {
        let provider = StdlibProvider::new();
        let found = provider.find(&[Identifier::from("List")]);
        let candidates = found.get(&Identifier::from("List"));
        let paths: Vec<String> = candidates
            .iter()
            .map(|c| c.import.selector.to_string())
            .collect();
        assert!(paths.contains(&"java.util.List".to_string()));
        assert!(paths.contains(&"java.awt.List".to_string()));
    }

    #[test]
    fn unknown_identifiers_produce_no_entry() {
        let provider = StdlibProvider::new();
        let found = provider.find(&[Identifier::from("FooBarBaz")]);
        assert!(found.is_empty());
    }

    #[test]
    fn java_lang_types_need_no_import() {
        assert!(is_java_lang(&Identifier::from("String")));
        assert!(is_java_lang(&Identifier::from("Override")));
        assert!(!is_java_lang(&Identifier::from("List")));
    }
}
