// This suite validates:

// * callback pipelines deliver one result per write, in order
// * the error callback fires exactly once, on the first fatal error
// * worker threads preserve submission order and hand their half back

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use bytes::Bytes;
    use crossbeam::channel::unbounded;
    use framing_core::config::FramingConfig;
    use framing_core::pipeline::{
        new_decoder, new_encoder, spawn_decode_worker, spawn_encode_worker, DecodePipeline, Encoder,
        EncodePipeline,
    };
    use framing_core::types::FramingError;

    const KEY: [u8; 32] = [7u8; 32];
    const IV: [u8; 16] = [9u8; 16];

    // 1. Encode -> decode through callbacks
    #[test]
    fn callbacks_round_trip() {
        let wires = Rc::new(RefCell::new(Vec::<Bytes>::new()));
        let payloads = Rc::new(RefCell::new(Vec::<Bytes>::new()));
        let errors = Rc::new(RefCell::new(0usize));

        let sink = Rc::clone(&wires);
        let err_sink = Rc::clone(&errors);
        let mut enc = EncodePipeline::new(
            new_encoder(&KEY, &IV).unwrap(),
            move |wire: Bytes| sink.borrow_mut().push(wire),
            move |_: &FramingError| *err_sink.borrow_mut() += 1,
        );

        let out = Rc::clone(&payloads);
        let err_sink = Rc::clone(&errors);
        let mut dec = DecodePipeline::new(
            new_decoder(&KEY, &IV).unwrap(),
            move |payload: Bytes| out.borrow_mut().push(payload),
            move |_: &FramingError| *err_sink.borrow_mut() += 1,
        );

        for i in 0..10 {
            enc.write(format!("message {i}").as_bytes()).unwrap();
        }
        assert_eq!(wires.borrow().len(), 10);

        for wire in wires.borrow().iter() {
            dec.write(wire).unwrap();
        }

        let payloads = payloads.borrow();
        assert_eq!(payloads.len(), 10);
        for (i, p) in payloads.iter().enumerate() {
            assert_eq!(p, format!("message {i}").as_bytes());
        }
        assert_eq!(*errors.borrow(), 0);
        assert_eq!(enc.encoder().send_counter(), 10);
        assert_eq!(dec.decoder().receive_counter(), 10);
    }

    // 2. First fatal error reported once, later writes rejected
    #[test]
    fn error_callback_fires_once() {
        let delivered = Rc::new(RefCell::new(0usize));
        let errors = Rc::new(RefCell::new(Vec::<String>::new()));

        let d = Rc::clone(&delivered);
        let e = Rc::clone(&errors);
        let mut dec = DecodePipeline::new(
            new_decoder(&KEY, &IV).unwrap(),
            move |_: Bytes| *d.borrow_mut() += 1,
            move |err: &FramingError| e.borrow_mut().push(err.to_string()),
        );

        let mut enc = new_encoder(&KEY, &IV).unwrap();
        let mut wire = enc.encode(b"will be corrupted").unwrap().wire.to_vec();
        wire[0] ^= 0x01;

        assert!(matches!(dec.write(&wire), Err(FramingError::ChecksumMismatch { .. })));
        assert!(matches!(dec.write(&wire), Err(FramingError::PipelineClosed)));
        assert!(matches!(dec.write(b"anything"), Err(FramingError::PipelineClosed)));

        assert_eq!(*delivered.borrow(), 0);
        assert_eq!(errors.borrow().len(), 1);
        assert!(errors.borrow()[0].contains("checksum mismatch at counter 0"));
    }

    // 3. Non-fatal rejection does not reach on_error
    #[test]
    fn payload_too_large_not_reported() {
        let errors = Rc::new(RefCell::new(0usize));
        let e = Rc::clone(&errors);
        let encoder = Encoder::from_slices(&KEY, &IV, &FramingConfig::default().with_max_payload_len(4)).unwrap();
        let mut enc = EncodePipeline::new(encoder, |_: Bytes| {}, move |_: &FramingError| *e.borrow_mut() += 1);

        assert!(matches!(enc.write(b"too long"), Err(FramingError::PayloadTooLarge { .. })));
        assert!(enc.write(b"ok").is_ok());
        assert_eq!(*errors.borrow(), 0);
        assert_eq!(enc.into_inner().send_counter(), 1);
    }

    // 4. Workers on both sides, FIFO order preserved
    #[test]
    fn workers_preserve_order() {
        let (enc_in_tx, enc_in_rx) = unbounded::<Bytes>();
        let (enc_out_tx, enc_out_rx) = unbounded();
        let (dec_in_tx, dec_in_rx) = unbounded::<Bytes>();
        let (dec_out_tx, dec_out_rx) = unbounded();

        let enc_handle = spawn_encode_worker(new_encoder(&KEY, &IV).unwrap(), enc_in_rx, enc_out_tx);
        let dec_handle = spawn_decode_worker(new_decoder(&KEY, &IV).unwrap(), dec_in_rx, dec_out_tx);

        // forward encoder output straight into the decoder
        let forward = std::thread::spawn(move || {
            for result in enc_out_rx.iter() {
                let packet = result.unwrap();
                dec_in_tx.send(packet.wire).unwrap();
            }
        });

        let n = 200u64;
        for i in 0..n {
            enc_in_tx.send(Bytes::from(format!("payload #{i}").repeat(i as usize % 7 + 1))).unwrap();
        }
        drop(enc_in_tx);

        for i in 0..n {
            let packet = dec_out_rx.recv().unwrap().unwrap();
            assert_eq!(packet.counter, i);
            assert_eq!(packet.payload, format!("payload #{i}").repeat(i as usize % 7 + 1).as_bytes());
        }

        let encoder = enc_handle.join().unwrap();
        forward.join().unwrap();
        let decoder = dec_handle.join().unwrap();
        assert_eq!(encoder.send_counter(), n);
        assert_eq!(decoder.receive_counter(), n);
        assert!(dec_out_rx.recv().is_err());
    }

    // 5. Decode worker stops on the first failure
    #[test]
    fn decode_worker_stops_on_error() {
        let (tx, rx) = unbounded::<Bytes>();
        let (out_tx, out_rx) = unbounded();
        let handle = spawn_decode_worker(new_decoder(&KEY, &IV).unwrap(), rx, out_tx);

        tx.send(Bytes::from_static(&[0u8; 32])).unwrap();
        // may race with the worker exiting
        let _ = tx.send(Bytes::from_static(&[0u8; 32]));

        assert!(matches!(out_rx.recv().unwrap(), Err(FramingError::ChecksumMismatch { .. })));
        let decoder = handle.join().unwrap();
        assert!(decoder.is_closed());
        assert_eq!(decoder.receive_counter(), 1);
        assert!(out_rx.recv().is_err());
    }
}
