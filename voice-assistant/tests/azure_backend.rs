use mockito::Matcher;
use tempfile::TempDir;
use voice_assistant::*;

fn devices(dir: &TempDir) -> WavDevices {
    let input = dir.path().join("question.wav");
    std::fs::write(&input, encode_wav(&[0, 200, -200, 0], 16000).unwrap()).unwrap();
    WavDevices::new(input, dir.path().join("replies"))
}

fn backend(server: &mockito::Server) -> AzureSpeechBackend {
    AzureSpeechBackend::new(SpeechEndpoints {
        stt_base_url: Some(server.url()),
        tts_base_url: Some(server.url()),
    })
}

#[tokio::test]
async fn recognizes_one_utterance() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/speech/recognition/conversation/cognitiveservices/v1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("language".into(), "hi-IN".into()),
            Matcher::UrlEncoded("format".into(), "simple".into()),
        ]))
        .match_header("authorization", "Bearer tok")
        .match_header("content-type", "audio/wav; codecs=audio/pcm; samplerate=16000")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"RecognitionStatus": "Success", "DisplayText": "मुझे बुखार है", "Offset": 0, "Duration": 100}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let devices = devices(&dir);
    let credential = SpeechCredential::new("tok", "centralindia");
    let mut recognizer = backend(&server)
        .recognizer(&credential, "hi-IN", devices.open_microphone().await.unwrap())
        .await
        .unwrap();

    let recognition = recognizer.recognize_once().await.unwrap();
    assert_eq!(recognition, Recognition::Recognized("मुझे बुखार है".to_string()));
    recognizer.close().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn silence_is_no_match() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/speech/recognition/conversation/cognitiveservices/v1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"RecognitionStatus": "InitialSilenceTimeout"}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let devices = devices(&dir);
    let mut recognizer = backend(&server)
        .recognizer(
            &SpeechCredential::new("tok", "centralindia"),
            "en-IN",
            devices.open_microphone().await.unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(recognizer.recognize_once().await.unwrap(), Recognition::NoMatch);
}

#[tokio::test]
async fn rejected_recognition_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/speech/recognition/conversation/cognitiveservices/v1")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let devices = devices(&dir);
    let mut recognizer = backend(&server)
        .recognizer(
            &SpeechCredential::new("expired", "centralindia"),
            "en-IN",
            devices.open_microphone().await.unwrap(),
        )
        .await
        .unwrap();

    assert!(matches!(
        recognizer.recognize_once().await,
        Err(VoiceError::Recognition(_))
    ));
}

#[tokio::test]
async fn synthesizes_markup_and_plays_the_audio() {
    let mut server = mockito::Server::new_async().await;
    let ssml = build_ssml("en-IN", "en-IN-PrabhatNeural", UrgencyTone::Emergency, "Call 108 now");
    let mock = server
        .mock("POST", "/cognitiveservices/v1")
        .match_header("authorization", "Bearer tok")
        .match_header("content-type", "application/ssml+xml")
        .match_header("x-microsoft-outputformat", "riff-16khz-16bit-mono-pcm")
        .match_body(Matcher::Exact(ssml.clone()))
        .with_status(200)
        .with_header("content-type", "audio/x-wav")
        .with_body(encode_wav(&[5, 6, 7, 8], 16000).unwrap())
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let devices = devices(&dir);
    let mut synthesizer = backend(&server)
        .synthesizer(
            &SpeechCredential::new("tok", "centralindia"),
            "en-IN-PrabhatNeural",
            devices.open_speaker().await.unwrap(),
        )
        .await
        .unwrap();

    synthesizer.speak_ssml(&ssml).await.unwrap();
    synthesizer.close().await.unwrap();

    assert_eq!(devices.replies_played(), 1);
    assert!(dir.path().join("replies/reply-001.wav").exists());
    mock.assert_async().await;
}

#[tokio::test]
async fn synthesis_failure_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/cognitiveservices/v1")
        .with_status(400)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let devices = devices(&dir);
    let mut synthesizer = backend(&server)
        .synthesizer(
            &SpeechCredential::new("tok", "centralindia"),
            "en-IN-NeerjaNeural",
            devices.open_speaker().await.unwrap(),
        )
        .await
        .unwrap();

    assert!(matches!(
        synthesizer.speak_ssml("<speak/>").await,
        Err(VoiceError::Synthesis(_))
    ));
    assert_eq!(devices.replies_played(), 0);
}
